use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::board::Board;
use crate::config::BoardConfig;
use crate::graph::{GraphModel, NodeKind, default_graph};
use crate::persist::{FileSync, GraphStore};
use crate::render::palette;

mod canvas;
mod ui;

pub struct BoardApp {
    config: BoardConfig,
    store: GraphStore,
    state: AppState,
}

enum AppState {
    Loading { rx: Receiver<GraphModel> },
    Ready(Box<BoardView>),
    Error(String),
}

struct BoardView {
    board: Board,
    search: String,
    search_miss: bool,
    add_node: AddNodeForm,
    pointer_inside: bool,
}

struct AddNodeForm {
    open: bool,
    kind: NodeKind,
    title: String,
    year: String,
    summary: String,
}

impl Default for AddNodeForm {
    fn default() -> Self {
        Self {
            open: false,
            kind: NodeKind::Topic,
            title: String::new(),
            year: String::new(),
            summary: String::new(),
        }
    }
}

impl BoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: BoardConfig, store: GraphStore) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let state = Self::start_load(store.clone());
        Self {
            config,
            store,
            state,
        }
    }

    fn spawn_load(store: GraphStore) -> Receiver<GraphModel> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(store.load_or_default());
        });

        rx
    }

    fn start_load(store: GraphStore) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(store),
        }
    }
}

impl BoardView {
    fn new(graph: GraphModel, config: BoardConfig, store: GraphStore) -> Self {
        let board = Board::new(graph, config).with_observer(Box::new(FileSync::new(store)));
        Self {
            board,
            search: String::new(),
            search_miss: false,
            add_node: AddNodeForm::default(),
            pointer_inside: false,
        }
    }

    fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_hud(ui));

        if self.board.selected().is_some() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        self.draw_add_node_window(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(palette::BACKGROUND))
            .show(ctx, |ui| self.draw_canvas(ui));
    }

    fn reset_graph(&mut self) {
        self.search.clear();
        self.search_miss = false;
        self.board.reset(default_graph());
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(graph) => {
                        transition = Some(AppState::Ready(Box::new(BoardView::new(
                            graph,
                            self.config.clone(),
                            self.store.clone(),
                        ))));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading board...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the board");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.store.clone()));
                    }
                });
            }
            AppState::Ready(view) => view.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
