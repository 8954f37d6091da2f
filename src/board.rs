//! The explicit state object driven by the host: graph, camera, pointer state
//! and display mode, plus the hook used to persist mutations.

use eframe::egui::{Pos2, Vec2};

use crate::camera::Camera;
use crate::config::{BoardConfig, DisplayMode};
use crate::graph::{
    GraphModel, Link, LinkInsert, Neighbor, Node, NodeDetails, NodeId, NodeKind, search_titles,
};
use crate::interaction::{Hover, Interaction, InteractionContext, PointerInput};
use crate::physics::{PhysicsScratch, step_physics};
use crate::render::{DrawCommand, Scene, draw};

/// Told about every mutation that actually changed the graph.
pub trait GraphObserver {
    fn graph_changed(&mut self, graph: &GraphModel);

    /// The whole graph was replaced by a fresh default.
    fn graph_reset(&mut self, graph: &GraphModel) {
        self.graph_changed(graph);
    }
}

pub struct Board {
    graph: GraphModel,
    camera: Camera,
    interaction: Interaction,
    mode: DisplayMode,
    config: BoardConfig,
    viewport: Vec2,
    scratch: PhysicsScratch,
    observer: Option<Box<dyn GraphObserver>>,
}

impl Board {
    pub fn new(graph: GraphModel, config: BoardConfig) -> Self {
        Self {
            graph,
            camera: Camera::default(),
            interaction: Interaction::default(),
            mode: config.default_mode,
            config,
            viewport: Vec2::ZERO,
            scratch: PhysicsScratch::default(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn GraphObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn selected(&self) -> Option<&Node> {
        self.interaction.selected().and_then(|id| self.graph.node(id))
    }

    pub fn hover(&self) -> Option<&Hover> {
        self.interaction.hover()
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.dragged_node().is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.interaction.is_panning()
    }

    pub fn tick(&mut self) {
        step_physics(
            &mut self.graph,
            self.interaction.dragged_node(),
            &self.config.physics,
            &mut self.scratch,
        );
    }

    pub fn draw(&self) -> Vec<DrawCommand> {
        let hover = self.interaction.hover().map(|hover| &hover.target);
        draw(&Scene {
            graph: &self.graph,
            camera: &self.camera,
            selected: self.interaction.selected(),
            hover,
            mode: self.mode,
            viewport: self.viewport,
        })
    }

    /// Records the canvas size. The first valid size centres the world origin.
    pub fn resize(&mut self, size: Vec2) {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        if self.viewport == Vec2::ZERO {
            self.camera = Camera::centered_in(size);
        }
        self.viewport = size;
    }

    pub fn reset_view(&mut self) {
        self.camera = Camera::centered_in(self.viewport);
    }

    pub fn pointer_down(&mut self, position: Pos2, shift: bool) {
        let context = InteractionContext {
            camera: &self.camera,
            hit_test: &self.config.hit_test,
            interaction: &self.config.interaction,
            mode: self.mode,
        };
        let request =
            self.interaction
                .pointer_down(&self.graph, PointerInput { position, shift }, context);
        if let Some(request) = request {
            self.add_link(&request.from, &request.to);
        }
    }

    pub fn pointer_move(&mut self, position: Pos2) {
        self.interaction.pointer_move(
            &mut self.graph,
            &mut self.camera,
            position,
            &self.config.hit_test,
        );
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    /// `delta` follows the wheel convention: positive scrolls down and zooms out.
    pub fn wheel(&mut self, position: Pos2, delta: f32) {
        self.camera.zoom_at(position, delta, &self.config.camera);
    }

    pub fn add_node(&mut self, node: Node) -> bool {
        let id = node.id.clone();
        if !self.graph.add_node(node) {
            tracing::debug!(%id, "node id already present");
            return false;
        }

        tracing::info!(%id, "added node");
        self.notify_changed();
        true
    }

    pub fn add_link(&mut self, a: &str, b: &str) -> LinkInsert {
        let outcome = self.graph.add_link(Link::user_connected(a, b));
        match outcome {
            LinkInsert::Inserted => {
                tracing::info!(source = a, target = b, "linked nodes");
                self.notify_changed();
            }
            LinkInsert::Duplicate | LinkInsert::MissingEndpoint | LinkInsert::SelfLink => {
                tracing::debug!(source = a, target = b, ?outcome, "link not added");
            }
        }
        outcome
    }

    /// Creates a node under the centre of the canvas and selects it.
    pub fn add_custom_node(
        &mut self,
        kind: NodeKind,
        title: &str,
        summary: &str,
        year: Option<i32>,
    ) -> Option<NodeId> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let id = self.graph.next_custom_id();
        let node = Node::new(id.clone(), kind, title)
            .at(self.screen_center_world())
            .with_details(NodeDetails {
                year,
                summary: summary.trim().to_owned(),
                ..NodeDetails::default()
            });
        if !self.add_node(node) {
            return None;
        }

        self.interaction.select(Some(id.clone()));
        Some(id)
    }

    pub fn screen_center_world(&self) -> Vec2 {
        self.camera.screen_to_world((self.viewport * 0.5).to_pos2())
    }

    /// Selects `id`, or clears the selection for `None` or an unknown id.
    pub fn select(&mut self, id: Option<&str>) {
        let id = id.filter(|id| self.graph.contains(id)).map(str::to_owned);
        self.interaction.select(id);
    }

    pub fn connections(&self, id: &str) -> Vec<Neighbor<'_>> {
        self.graph.neighbors(id)
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<NodeId> {
        search_titles(&self.graph, query, limit)
    }

    /// Selects `id` and moves the camera so the node sits mid-canvas.
    pub fn focus(&mut self, id: &str) -> bool {
        let Some(position) = self.graph.node(id).map(|node| node.position) else {
            return false;
        };
        self.select(Some(id));
        self.camera.center_on(position, self.viewport);
        true
    }

    /// Discards the current graph and all pointer state in favour of `graph`.
    pub fn reset(&mut self, graph: GraphModel) {
        tracing::info!(
            nodes = graph.node_count(),
            links = graph.link_count(),
            "resetting graph"
        );
        self.graph = graph;
        self.interaction = Interaction::default();
        self.reset_view();
        if let Some(observer) = self.observer.as_mut() {
            observer.graph_reset(&self.graph);
        }
    }

    fn notify_changed(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.graph_changed(&self.graph);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::graph::default_graph;
    use crate::interaction::PointerState;

    #[derive(Default)]
    struct Log {
        changes: usize,
        resets: usize,
        last_node_count: usize,
    }

    struct Recorder(Rc<RefCell<Log>>);

    impl GraphObserver for Recorder {
        fn graph_changed(&mut self, graph: &GraphModel) {
            let mut log = self.0.borrow_mut();
            log.changes += 1;
            log.last_node_count = graph.node_count();
        }

        fn graph_reset(&mut self, graph: &GraphModel) {
            let mut log = self.0.borrow_mut();
            log.resets += 1;
            log.last_node_count = graph.node_count();
        }
    }

    fn board() -> (Board, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut graph = GraphModel::new();
        graph.add_node(Node::new("a", NodeKind::Person, "Alpha").at(vec2(-100.0, 0.0)));
        graph.add_node(Node::new("b", NodeKind::EventCraft, "Beta").at(vec2(100.0, 0.0)));
        let mut board = Board::new(graph, BoardConfig::default())
            .with_observer(Box::new(Recorder(Rc::clone(&log))));
        board.resize(vec2(800.0, 600.0));
        (board, log)
    }

    fn screen_of(board: &Board, id: &str) -> Pos2 {
        let node = board.graph().node(id).expect("node");
        board.camera().world_to_screen(node.position)
    }

    #[test]
    fn duplicate_links_notify_only_once() {
        let (mut board, log) = board();
        assert_eq!(board.add_link("a", "b"), LinkInsert::Inserted);
        assert_eq!(board.add_link("b", "a"), LinkInsert::Duplicate);
        assert_eq!(board.add_link("a", "missing"), LinkInsert::MissingEndpoint);

        assert_eq!(board.graph().link_count(), 1);
        assert_eq!(log.borrow().changes, 1);
    }

    #[test]
    fn shift_click_links_the_selected_node() {
        let (mut board, log) = board();
        board.pointer_down(screen_of(&board, "a"), false);
        board.pointer_up();
        board.pointer_down(screen_of(&board, "b"), true);

        let link = board.graph().find_link("a", "b").expect("link");
        assert_eq!(link.relation, "user_connected");
        assert!(link.description.is_some());
        assert_eq!(board.selected().map(|node| node.id.as_str()), Some("a"));
        assert!(!board.is_dragging());
        assert_eq!(log.borrow().changes, 1);

        board.pointer_up();
        board.pointer_down(screen_of(&board, "b"), true);
        assert_eq!(board.graph().link_count(), 1);
        assert_eq!(log.borrow().changes, 1);
    }

    #[test]
    fn dragged_node_is_pinned_during_ticks() {
        let (mut board, _log) = board();
        let start = screen_of(&board, "b");
        board.pointer_down(start, false);
        board.pointer_move(start + vec2(20.0, 20.0));
        board.tick();

        let node = board.graph().node("b").expect("b");
        assert_eq!(node.velocity, Vec2::ZERO);
        assert_eq!(node.position, vec2(120.0, 20.0));
    }

    #[test]
    fn custom_nodes_land_mid_canvas_with_unique_ids() {
        let (mut board, log) = board();
        board.pointer_down(pos2(10.0, 10.0), false);
        board.pointer_move(pos2(60.0, 40.0));
        board.pointer_up();

        let first = board
            .add_custom_node(NodeKind::Topic, "  Wilson Memo ", "leaked notes", None)
            .expect("first");
        let second = board
            .add_custom_node(NodeKind::EventGov, "Wilson Memo", "", Some(1997))
            .expect("second");
        assert_ne!(first, second);
        assert_eq!(board.add_custom_node(NodeKind::Topic, "   ", "no title", None), None);

        let node = board.graph().node(&first).expect("node");
        assert_eq!(node.kind, NodeKind::Topic);
        assert_eq!(node.title, "Wilson Memo");
        assert_eq!(node.details.summary, "leaked notes");
        assert_eq!(node.details.year, None);
        assert_eq!(node.position, vec2(-50.0, -30.0));

        let node = board.graph().node(&second).expect("node");
        assert_eq!(node.kind, NodeKind::EventGov);
        assert_eq!(node.details.year, Some(1997));
        assert_eq!(node.radius, NodeKind::EventGov.style().radius);
        assert_eq!(board.selected().map(|node| node.id.clone()), Some(second));
        assert_eq!(log.borrow().changes, 2);
    }

    #[test]
    fn focus_selects_and_centres() {
        let (mut board, _log) = board();
        assert!(board.focus("b"));
        assert_eq!(board.selected().map(|node| node.id.as_str()), Some("b"));
        assert_eq!(screen_of(&board, "b"), pos2(400.0, 300.0));
        assert!(!board.focus("missing"));
    }

    #[test]
    fn reset_replaces_graph_and_clears_pointer_state() {
        let (mut board, log) = board();
        board.pointer_down(screen_of(&board, "a"), false);
        board.wheel(pos2(100.0, 100.0), -400.0);

        board.reset(default_graph());

        assert_eq!(board.interaction.state(), &PointerState::Idle);
        assert!(board.selected().is_none());
        assert_eq!(*board.camera(), Camera::centered_in(vec2(800.0, 600.0)));
        let log = log.borrow();
        assert_eq!(log.resets, 1);
        assert_eq!(log.changes, 0);
        assert_eq!(log.last_node_count, default_graph().node_count());
    }

    #[test]
    fn connections_list_neighbours_with_relations() {
        let (mut board, _log) = board();
        board.add_link("a", "b");
        let connections = board.connections("b");
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].node.id, "a");
        assert_eq!(connections[0].link.relation, "user_connected");
    }

    #[test]
    fn empty_graph_still_ticks_and_draws() {
        let mut board = Board::new(GraphModel::new(), BoardConfig::default());
        board.resize(vec2(320.0, 200.0));
        board.tick();
        board.pointer_down(pos2(5.0, 5.0), false);
        board.pointer_move(pos2(9.0, 5.0));
        board.pointer_leave();

        let commands = board.draw();
        assert!(commands
            .iter()
            .all(|command| matches!(command, DrawCommand::GridLine { .. })));
    }
}
