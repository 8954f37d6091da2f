use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "event_craft")]
    EventCraft,
    #[serde(rename = "event_entity")]
    EventEntity,
    #[serde(rename = "event_psi")]
    EventPsi,
    #[serde(rename = "event_occult")]
    EventOccult,
    #[serde(rename = "event_gov")]
    EventGov,
    #[serde(rename = "event_cryptid")]
    EventCryptid,
    #[serde(rename = "concept_person")]
    Person,
    #[serde(rename = "concept_program", alias = "program")]
    Program,
    #[serde(rename = "concept_topic", alias = "topic")]
    Topic,
    /// A person recorded as a leaf entity rather than a research hub.
    #[serde(rename = "person")]
    Individual,
    #[serde(rename = "source")]
    Source,
    #[serde(rename = "claim")]
    Claim,
    #[serde(rename = "phenomenon")]
    Phenomenon,
    #[serde(rename = "tag")]
    Tag,
    #[serde(rename = "thread")]
    Thread,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub radius: f32,
    pub color: Color32,
    pub label: &'static str,
}

impl NodeKind {
    #[cfg(test)]
    pub const ALL: [Self; 15] = [
        Self::EventCraft,
        Self::EventEntity,
        Self::EventPsi,
        Self::EventOccult,
        Self::EventGov,
        Self::EventCryptid,
        Self::Person,
        Self::Program,
        Self::Topic,
        Self::Individual,
        Self::Source,
        Self::Claim,
        Self::Phenomenon,
        Self::Tag,
        Self::Thread,
    ];

    /// Kinds offered when a person creates a node by hand.
    pub const CREATABLE: [Self; 7] = [
        Self::Person,
        Self::Program,
        Self::Topic,
        Self::EventCraft,
        Self::EventEntity,
        Self::EventGov,
        Self::EventPsi,
    ];

    /// Structural hubs push their neighbourhood apart harder than leaf records.
    pub fn is_hub(self) -> bool {
        match self {
            Self::Person | Self::Program | Self::Topic => true,
            Self::EventCraft
            | Self::EventEntity
            | Self::EventPsi
            | Self::EventOccult
            | Self::EventGov
            | Self::EventCryptid
            | Self::Individual
            | Self::Source
            | Self::Claim
            | Self::Phenomenon
            | Self::Tag
            | Self::Thread => false,
        }
    }

    pub fn is_event(self) -> bool {
        matches!(
            self,
            Self::EventCraft
                | Self::EventEntity
                | Self::EventPsi
                | Self::EventOccult
                | Self::EventGov
                | Self::EventCryptid
        )
    }

    pub fn style(self) -> NodeStyle {
        let (radius, (r, g, b), label) = match self {
            Self::EventCraft => (8.0, (59, 130, 246), "Craft"),
            Self::EventEntity => (8.0, (168, 85, 247), "Entity"),
            Self::EventPsi => (8.0, (236, 72, 153), "Psi"),
            Self::EventOccult => (8.0, (239, 68, 68), "Occult"),
            Self::EventGov => (8.0, (234, 179, 8), "Government"),
            Self::EventCryptid => (8.0, (34, 197, 94), "Cryptid"),
            Self::Person => (25.0, (249, 115, 22), "Person"),
            Self::Program => (30.0, (100, 116, 139), "Program"),
            Self::Topic => (20.0, (20, 184, 166), "Topic"),
            Self::Individual => (6.0, (249, 115, 22), "Person"),
            Self::Source => (4.0, (100, 116, 139), "Source"),
            Self::Claim => (5.0, (244, 63, 94), "Claim"),
            Self::Phenomenon => (5.0, (132, 204, 22), "Phenomenon"),
            Self::Tag => (3.0, (6, 182, 212), "Tag"),
            Self::Thread => (7.0, (217, 70, 239), "Thread"),
        };

        NodeStyle {
            radius,
            color: Color32::from_rgb(r, g, b),
            label,
        }
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }
}
