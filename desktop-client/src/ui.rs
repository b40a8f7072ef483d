use tokio::sync::mpsc;

use common::game::{Direction, GRID_SIZE, GameState, Phase, Point};
use common::validation::validate_player_name;

use crate::state::{ClientCommand, SharedState};

pub struct SnakeApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<ClientCommand>,
    player_name: String,
}

impl SnakeApp {
    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<ClientCommand>,
        player_name: String,
    ) -> Self {
        Self {
            shared_state,
            command_tx,
            player_name,
        }
    }

    fn send(&self, command: ClientCommand) {
        let _ = self.command_tx.send(command);
    }

    fn handle_input(&self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let direction = ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
                Some(Direction::Up)
            } else if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
                Some(Direction::Down)
            } else if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A) {
                Some(Direction::Left)
            } else if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D) {
                Some(Direction::Right)
            } else {
                None
            }
        });
        if let Some(direction) = direction {
            self.send(ClientCommand::Turn { direction });
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.send(ClientCommand::TogglePause);
        }
    }

    fn render_board(&self, ui: &mut egui::Ui, game: &GameState) {
        let available = ui.available_size();
        let cell_size = ((available.x.min(available.y - 60.0)) / GRID_SIZE as f32)
            .floor()
            .clamp(8.0, 30.0);
        let board_size = cell_size * GRID_SIZE as f32;

        let (response, painter) =
            ui.allocate_painter(egui::vec2(board_size, board_size), egui::Sense::hover());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, egui::CornerRadius::same(4), egui::Color32::WHITE);
        painter.rect_stroke(
            response.rect,
            egui::CornerRadius::same(4),
            egui::Stroke::new(2.0, egui::Color32::from_rgb(76, 175, 80)),
            egui::StrokeKind::Outside,
        );

        let cell_rect = |cell: Point| {
            egui::Rect::from_min_size(
                origin + egui::vec2(cell.x as f32 * cell_size, cell.y as f32 * cell_size),
                egui::vec2(cell_size - 1.0, cell_size - 1.0),
            )
        };

        painter.rect_filled(
            cell_rect(game.food()),
            egui::CornerRadius::same(2),
            egui::Color32::RED,
        );

        for (index, segment) in game.segments().iter().enumerate() {
            let alpha = (1.0 - index as f32 * 0.1).max(0.3);
            let color = egui::Color32::from_rgba_unmultiplied(76, 175, 80, (alpha * 255.0) as u8);
            painter.rect_filled(cell_rect(*segment), egui::CornerRadius::same(2), color);
        }
    }

    fn render_leaderboard_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("leaderboard")
            .min_width(220.0)
            .show(ctx, |ui| {
                ui.heading("High scores");
                if ui.button("Refresh").clicked() {
                    self.send(ClientCommand::FetchLeaderboard);
                }
                ui.separator();

                let leaderboard = self.shared_state.leaderboard();
                if leaderboard.is_empty() {
                    ui.label("No scores yet");
                }
                for (index, record) in leaderboard.iter().enumerate() {
                    ui.label(format!(
                        "{:>2}. {}  {}",
                        index + 1,
                        record.player_name,
                        record.score
                    ));
                }

                ui.separator();
                ui.label("Player name:");
                ui.text_edit_singleline(&mut self.player_name);

                if let Some(status) = self.shared_state.status() {
                    ui.colored_label(egui::Color32::DARK_GREEN, status);
                }
                if let Some(error) = self.shared_state.error() {
                    ui.colored_label(egui::Color32::RED, error);
                }
            });
    }

    fn render_game_over_controls(&self, ui: &mut egui::Ui, game: &GameState) {
        ui.add_space(8.0);
        let can_submit = game.score() > 0
            && !self.shared_state.score_submitted()
            && !self.shared_state.submission_in_flight()
            && validate_player_name(&self.player_name).is_ok();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_submit, egui::Button::new("Submit score"))
                .clicked()
            {
                self.send(ClientCommand::SubmitScore {
                    player_name: self.player_name.clone(),
                });
            }
            if ui.button("Play again").clicked() {
                self.send(ClientCommand::NewGame);
            }
        });
        if game.score() == 0 {
            ui.label("Zero scores are not submitted");
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        let game = self.shared_state.game();

        self.render_leaderboard_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(format!("Score: {}", game.score()));
                match game.phase() {
                    Phase::Running => {
                        ui.label("Arrows or WASD to steer, space to pause");
                    }
                    Phase::Paused => {
                        ui.colored_label(
                            egui::Color32::LIGHT_BLUE,
                            "Paused (press space to continue)",
                        );
                    }
                    Phase::Over => {
                        ui.colored_label(
                            egui::Color32::RED,
                            egui::RichText::new("Game over!").size(20.0),
                        );
                    }
                }
                ui.add_space(8.0);
                self.render_board(ui, &game);
                if game.phase() == Phase::Over {
                    self.render_game_over_controls(ui, &game);
                }
            });
        });

        // The game advances on a background task; keep the view fresh.
        ctx.request_repaint_after(std::time::Duration::from_millis(50));
    }
}
