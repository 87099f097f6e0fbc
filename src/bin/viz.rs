use std::time::Instant;

use eframe::egui::{self, Color32, Shape};
use egui_plot::{Line, Plot, PlotPoints};

use lorenz_sim::render::Viewport;
use lorenz_sim::sim::{Simulation, TickClock};
use lorenz_sim::types::{Retention, SimConfig};

// Keeps per-frame drawing bounded on long sessions.
const VIEW_CAPACITY: usize = 200_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SimConfig::default().with_retention(Retention::Decimate(VIEW_CAPACITY));
    let app = LorenzViz::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title("Lorenz Attractor"),
        ..Default::default()
    };
    eframe::run_native("Lorenz Attractor", options, Box::new(|_| Ok(Box::new(app))))?;
    Ok(())
}

struct LorenzViz {
    sim: Simulation,
    clock: TickClock,
    last_frame: Instant,
}

impl LorenzViz {
    fn new(config: &SimConfig) -> lorenz_sim::Result<Self> {
        Ok(Self {
            sim: Simulation::new(config)?,
            clock: TickClock::new(config.tick_period)?,
            last_frame: Instant::now(),
        })
    }
}

impl eframe::App for LorenzViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.clock.drive(&mut self.sim, now - self.last_frame);
        self.last_frame = now;

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Start").clicked() && self.sim.start() {
                    self.clock.reset();
                }
                if ui.button("Stop").clicked() {
                    self.sim.stop();
                }
                ui.separator();
                let s = self.sim.state();
                ui.label(format!(
                    "step {}  |  x {:.2}  y {:.2}  z {:.2}",
                    self.sim.steps(),
                    s.x(),
                    s.y(),
                    s.z()
                ));
            });
        });

        egui::TopBottomPanel::bottom("x_strip")
            .resizable(false)
            .exact_height(110.0)
            .show(ctx, |ui| {
                let snapshot = self.sim.snapshot();
                let step = (snapshot.len() / 2000).max(1);
                let points: PlotPoints = snapshot
                    .iter_indexed()
                    .step_by(step)
                    .map(|(n, s)| [n as f64, s.x()])
                    .collect();
                Plot::new("x_vs_step")
                    .x_axis_label("step")
                    .allow_scroll(false)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new("x", points));
                    });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                // Collapsed canvas (e.g. minimised window): nothing to draw.
                let Ok(viewport) = Viewport::new(
                    rect.width().max(0.0) as u32,
                    rect.height().max(0.0) as u32,
                ) else {
                    return;
                };

                let marks: Vec<Shape> = self
                    .sim
                    .projected(viewport)
                    .filter(|p| viewport.contains(*p))
                    .map(|p| {
                        let min = rect.min + egui::vec2(p.x as f32, p.y as f32);
                        Shape::rect_filled(
                            egui::Rect::from_min_size(min, egui::vec2(1.0, 1.0)),
                            0.0,
                            Color32::WHITE,
                        )
                    })
                    .collect();
                painter.extend(marks);
            });

        if self.sim.is_running() {
            ctx.request_repaint_after(self.clock.until_next());
        }
    }
}
