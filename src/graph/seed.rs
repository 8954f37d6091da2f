use eframe::egui::{Color32, vec2};

use crate::util::stable_pair;

use super::kind::NodeKind;
use super::model::{GraphModel, Link, Node, NodeDetails};

#[derive(Clone, Copy)]
enum LinkTone {
    Investigated,
    Involved,
    ProgramParent,
}

impl LinkTone {
    fn color(self) -> Color32 {
        match self {
            Self::Investigated => Color32::from_rgb(239, 68, 68),
            Self::Involved => Color32::from_rgb(245, 158, 11),
            Self::ProgramParent => Color32::from_rgb(148, 163, 184),
        }
    }
}

const SEED_NODES: &[(&str, &str, NodeKind, Option<i32>, &str)] = &[
    (
        "h_vallee",
        "Jacques Vallée",
        NodeKind::Person,
        None,
        "Computer scientist and researcher behind the interdimensional hypothesis.",
    ),
    (
        "h_bluebook",
        "Project Blue Book",
        NodeKind::Program,
        Some(1952),
        "USAF systematic study of aerial phenomena, run out of Wright-Patterson AFB.",
    ),
    (
        "h_hynek",
        "J. Allen Hynek",
        NodeKind::Person,
        None,
        "Astronomer and scientific advisor to Blue Book, later founder of CUFOS.",
    ),
    (
        "h_pentagon",
        "The Pentagon",
        NodeKind::Program,
        None,
        "Headquarters of the US Department of Defense.",
    ),
    (
        "h_skinwalker",
        "Skinwalker Ranch",
        NodeKind::Topic,
        Some(1996),
        "Hotspot of reported anomalous activity in the Uinta Basin, Utah.",
    ),
    (
        "h_keel",
        "John Keel",
        NodeKind::Person,
        None,
        "Journalist who tied aerial sightings to cryptids and high strangeness.",
    ),
    (
        "e_roswell",
        "Roswell Incident",
        NodeKind::EventCraft,
        Some(1947),
        "The foundational crash retrieval case.",
    ),
    (
        "e_socorro",
        "Socorro Landing",
        NodeKind::EventCraft,
        Some(1964),
        "Lonnie Zamora reports an egg-shaped craft and two small figures.",
    ),
    (
        "e_flatwoods",
        "Flatwoods Monster",
        NodeKind::EventEntity,
        Some(1952),
        "A tall entity with a spade-shaped head is reported after a fiery crash.",
    ),
    (
        "e_mothman",
        "Mothman Prophecies",
        NodeKind::EventCryptid,
        Some(1966),
        "Thirteen months of sightings in Point Pleasant ending with the Silver Bridge collapse.",
    ),
    (
        "e_tic_tac",
        "Nimitz Tic-Tac",
        NodeKind::EventCraft,
        Some(2004),
        "Navy pilots track an object with unexplained flight characteristics off San Diego.",
    ),
    (
        "e_aatip",
        "AATIP Program",
        NodeKind::EventGov,
        Some(2007),
        "Advanced Aerospace Threat Identification Program.",
    ),
];

const SEED_LINKS: &[(&str, &str, &str, LinkTone, &str)] = &[
    (
        "h_bluebook",
        "e_roswell",
        "investigated",
        LinkTone::Investigated,
        "Blue Book files reference the case although RAAF ran the main inquiry.",
    ),
    (
        "h_bluebook",
        "e_socorro",
        "investigated",
        LinkTone::Investigated,
        "Counted among the most credible cases in the Blue Book record.",
    ),
    (
        "h_bluebook",
        "e_flatwoods",
        "investigated",
        LinkTone::Investigated,
        "Investigators were dispatched and reported evidence of a meteor.",
    ),
    (
        "h_bluebook",
        "h_hynek",
        "program_parent",
        LinkTone::ProgramParent,
        "Hynek served as chief scientific consultant.",
    ),
    (
        "h_keel",
        "e_mothman",
        "investigated",
        LinkTone::Investigated,
        "Keel spent 1966-1967 in Point Pleasant and wrote the book on it.",
    ),
    (
        "h_keel",
        "h_vallee",
        "correspondence",
        LinkTone::Involved,
        "Corresponded on the interdimensional reading of the phenomenon.",
    ),
    (
        "h_vallee",
        "h_hynek",
        "colleague",
        LinkTone::Involved,
        "Both pushed for scientific study beyond the nuts-and-bolts hypothesis.",
    ),
    (
        "h_vallee",
        "e_socorro",
        "analyzed",
        LinkTone::Investigated,
        "Vallée analyzed the trace evidence and insignia Zamora reported.",
    ),
    (
        "h_pentagon",
        "e_aatip",
        "funded",
        LinkTone::Involved,
        "Funded through a congressional initiative.",
    ),
    (
        "e_aatip",
        "h_skinwalker",
        "studied",
        LinkTone::Investigated,
        "A contractor studied the ranch under the program.",
    ),
    (
        "e_aatip",
        "e_tic_tac",
        "studied",
        LinkTone::Investigated,
        "The defining case behind the 2017 disclosure.",
    ),
];

/// The graph installed when nothing was saved or a reset was requested.
pub fn default_graph() -> GraphModel {
    let nodes = SEED_NODES
        .iter()
        .map(|&(id, title, kind, year, summary)| {
            let (jx, jy) = stable_pair(id);
            Node::new(id, kind, title)
                .at(vec2(jx * 400.0, jy * 300.0))
                .with_details(NodeDetails {
                    year,
                    summary: summary.to_owned(),
                    ..NodeDetails::default()
                })
        })
        .collect();

    let links = SEED_LINKS
        .iter()
        .map(|&(source, target, relation, tone, description)| Link {
            color: tone.color(),
            description: Some(description.to_owned()),
            ..Link::new(source, target, relation)
        })
        .collect();

    GraphModel::from_parts(nodes, links)
}
