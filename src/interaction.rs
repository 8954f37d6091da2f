use eframe::egui::{Pos2, Vec2};

use crate::camera::Camera;
use crate::config::{DisplayMode, HitTestConfig, InteractionConfig};
use crate::graph::{GraphModel, NodeId};
use crate::hit_test::{HitTarget, hit_test};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Canvas-relative screen position.
    pub position: Pos2,
    pub shift: bool,
}

/// Hover target plus the pointer position used to place its tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct Hover {
    pub target: HitTarget,
    pub position: Pos2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Idle,
    Hovering(Hover),
    DraggingNode(NodeId),
    Panning {
        last: Pos2,
    },
}

/// A shift-click between two distinct nodes asks the board for a new link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkRequest {
    pub from: NodeId,
    pub to: NodeId,
}

#[derive(Clone, Copy)]
pub struct InteractionContext<'a> {
    pub camera: &'a Camera,
    pub hit_test: &'a HitTestConfig,
    pub interaction: &'a InteractionConfig,
    pub mode: DisplayMode,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
    state: PointerState,
    selected: Option<NodeId>,
}

impl Interaction {
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: Option<NodeId>) {
        self.selected = id;
    }

    pub fn hover(&self) -> Option<&Hover> {
        match &self.state {
            PointerState::Hovering(hover) => Some(hover),
            _ => None,
        }
    }

    pub fn dragged_node(&self) -> Option<&str> {
        match &self.state {
            PointerState::DraggingNode(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, PointerState::Panning { .. })
    }

    pub fn pointer_down(
        &mut self,
        graph: &GraphModel,
        input: PointerInput,
        context: InteractionContext<'_>,
    ) -> Option<LinkRequest> {
        if !input.position.is_finite() {
            return None;
        }

        let hit = hit_test(graph, context.camera, input.position, context.hit_test);
        match hit {
            Some(HitTarget::Node(id)) => {
                if input.shift
                    && let Some(selected) = self.selected.as_ref()
                    && *selected != id
                {
                    return Some(LinkRequest {
                        from: selected.clone(),
                        to: id,
                    });
                }

                self.selected = Some(id.clone());
                self.state = PointerState::DraggingNode(id);
                None
            }
            Some(HitTarget::Link { .. }) | None => {
                let clears = context
                    .interaction
                    .clear_selection_on_empty_click
                    .for_mode(context.mode);
                if !input.shift && clears {
                    self.selected = None;
                }
                self.state = PointerState::Panning {
                    last: input.position,
                };
                None
            }
        }
    }

    pub fn pointer_move(
        &mut self,
        graph: &mut GraphModel,
        camera: &mut Camera,
        position: Pos2,
        hit_config: &HitTestConfig,
    ) {
        if !position.is_finite() {
            return;
        }

        match &mut self.state {
            PointerState::DraggingNode(id) => {
                let world = camera.screen_to_world(position);
                match graph.node_mut(id) {
                    Some(node) => {
                        node.position = world;
                        node.velocity = Vec2::ZERO;
                    }
                    None => self.state = PointerState::Idle,
                }
            }
            PointerState::Panning { last } => {
                camera.pan_by(position - *last);
                *last = position;
            }
            PointerState::Idle | PointerState::Hovering(_) => {
                self.state = match hit_test(graph, camera, position, hit_config) {
                    Some(target) => PointerState::Hovering(Hover { target, position }),
                    None => PointerState::Idle,
                };
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.state = PointerState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.state = PointerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::graph::{Link, Node, NodeKind};

    struct Fixture {
        graph: GraphModel,
        camera: Camera,
        hit_test: HitTestConfig,
        interaction: InteractionConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut graph = GraphModel::new();
            graph.add_node(Node::new("a", NodeKind::Topic, "A").at(vec2(-100.0, 0.0)));
            graph.add_node(Node::new("b", NodeKind::Topic, "B").at(vec2(100.0, 0.0)));
            graph.add_node(Node::new("c", NodeKind::Tag, "C").at(vec2(0.0, 200.0)));
            let _ = graph.add_link(Link::new("a", "b", "relates_to"));

            Self {
                graph,
                camera: Camera {
                    scale: 1.0,
                    translate: vec2(400.0, 300.0),
                },
                hit_test: HitTestConfig::default(),
                interaction: InteractionConfig::default(),
            }
        }

        fn context(&self, mode: DisplayMode) -> InteractionContext<'_> {
            InteractionContext {
                camera: &self.camera,
                hit_test: &self.hit_test,
                interaction: &self.interaction,
                mode,
            }
        }

        fn screen(&self, world: Vec2) -> Pos2 {
            self.camera.world_to_screen(world)
        }

        fn down(&self, interaction: &mut Interaction, world: Vec2, shift: bool) -> Option<LinkRequest> {
            self.down_in(interaction, world, shift, DisplayMode::Research)
        }

        fn down_in(
            &self,
            interaction: &mut Interaction,
            world: Vec2,
            shift: bool,
            mode: DisplayMode,
        ) -> Option<LinkRequest> {
            let input = PointerInput {
                position: self.screen(world),
                shift,
            };
            interaction.pointer_down(&self.graph, input, self.context(mode))
        }

        fn move_to(&mut self, interaction: &mut Interaction, screen: Pos2) {
            interaction.pointer_move(&mut self.graph, &mut self.camera, screen, &self.hit_test);
        }
    }

    #[test]
    fn pressing_a_node_selects_and_drags_it() {
        let mut fixture = Fixture::new();
        let mut interaction = Interaction::default();

        assert_eq!(fixture.down(&mut interaction, vec2(-100.0, 0.0), false), None);
        assert_eq!(interaction.selected(), Some("a"));
        assert_eq!(interaction.dragged_node(), Some("a"));

        if let Some(node) = fixture.graph.node_mut("a") {
            node.velocity = vec2(3.0, 3.0);
        }
        let target = fixture.screen(vec2(-40.0, 60.0));
        fixture.move_to(&mut interaction, target);

        let node = fixture.graph.node("a").expect("a");
        assert_eq!(node.position, vec2(-40.0, 60.0));
        assert_eq!(node.velocity, Vec2::ZERO);

        interaction.pointer_up();
        assert_eq!(interaction.state(), &PointerState::Idle);
        assert_eq!(interaction.selected(), Some("a"));
    }

    #[test]
    fn shift_press_on_another_node_requests_a_link() {
        let fixture = Fixture::new();
        let mut interaction = Interaction::default();
        fixture.down(&mut interaction, vec2(-100.0, 0.0), false);
        interaction.pointer_up();

        let request = fixture.down(&mut interaction, vec2(0.0, 200.0), true);
        assert_eq!(
            request,
            Some(LinkRequest {
                from: "a".into(),
                to: "c".into()
            })
        );
        assert_eq!(interaction.selected(), Some("a"));
        assert_eq!(interaction.state(), &PointerState::Idle);
    }

    #[test]
    fn shift_press_on_the_selected_node_just_drags() {
        let fixture = Fixture::new();
        let mut interaction = Interaction::default();
        fixture.down(&mut interaction, vec2(-100.0, 0.0), false);
        interaction.pointer_up();

        assert_eq!(fixture.down(&mut interaction, vec2(-100.0, 0.0), true), None);
        assert_eq!(interaction.dragged_node(), Some("a"));
    }

    #[test]
    fn empty_press_pans_and_clears_selection_only_where_configured() {
        let mut fixture = Fixture::new();
        let mut interaction = Interaction::default();
        interaction.select(Some("b".into()));

        fixture.down_in(&mut interaction, vec2(0.0, -250.0), false, DisplayMode::Show);
        assert!(interaction.is_panning());
        assert_eq!(interaction.selected(), Some("b"));
        interaction.pointer_up();

        fixture.down_in(&mut interaction, vec2(0.0, -250.0), true, DisplayMode::Research);
        assert_eq!(interaction.selected(), Some("b"));
        interaction.pointer_up();

        let start = fixture.screen(vec2(0.0, -250.0));
        fixture.down_in(&mut interaction, vec2(0.0, -250.0), false, DisplayMode::Research);
        assert_eq!(interaction.selected(), None);

        fixture.move_to(&mut interaction, start + vec2(30.0, -10.0));
        fixture.move_to(&mut interaction, start + vec2(35.0, -10.0));
        assert_eq!(fixture.camera.translate, vec2(435.0, 290.0));
        assert_eq!(fixture.camera.scale, 1.0);
    }

    #[test]
    fn pressing_a_link_pans_instead_of_selecting() {
        let fixture = Fixture::new();
        let mut interaction = Interaction::default();
        fixture.down(&mut interaction, vec2(0.0, 0.0), false);
        assert!(interaction.is_panning());
        assert_eq!(interaction.selected(), None);
    }

    #[test]
    fn idle_moves_track_hover_over_nodes_and_links() {
        let mut fixture = Fixture::new();
        let mut interaction = Interaction::default();

        let over_node = fixture.screen(vec2(100.0, 2.0));
        fixture.move_to(&mut interaction, over_node);
        assert_eq!(
            interaction.hover(),
            Some(&Hover {
                target: HitTarget::Node("b".into()),
                position: over_node
            })
        );

        let over_link = fixture.screen(vec2(0.0, 1.0));
        fixture.move_to(&mut interaction, over_link);
        assert!(matches!(
            interaction.hover().map(|hover| &hover.target),
            Some(HitTarget::Link { .. })
        ));

        fixture.move_to(&mut interaction, pos2(0.0, 0.0));
        assert_eq!(interaction.hover(), None);
        assert_eq!(interaction.state(), &PointerState::Idle);
    }

    #[test]
    fn drag_and_pan_are_mutually_exclusive() {
        let fixture = Fixture::new();
        let mut interaction = Interaction::default();
        fixture.down(&mut interaction, vec2(-100.0, 0.0), false);
        assert!(interaction.dragged_node().is_some() && !interaction.is_panning());

        interaction.pointer_leave();
        fixture.down(&mut interaction, vec2(0.0, -250.0), false);
        assert!(interaction.dragged_node().is_none() && interaction.is_panning());
    }
}
