use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, path::Arc, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, Column, Container,
    },
    window, Alignment, Color, Element, Length, Pixels, Point, Radians, Rectangle, Renderer, Size,
    Subscription, Task, Theme,
};
use scanradar::render::{DisplayList, DrawCommand, ManualScheduler, Rgba};
use scanradar::{EngineConfig, LoopState, RadarEngine, ScanRecord};
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};

const BRIDGE_URL: &str = "http://127.0.0.1:9000";

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "WiFi Scan Radar".into()
}

fn application_subscription(state: &Visualizer) -> Subscription<Message> {
    let poll = time::every(Duration::from_secs(5)).map(|_| Message::Poll);
    if state.engine.is_frame_pending() {
        Subscription::batch([poll, window::frames().map(Message::Frame)])
    } else {
        poll
    }
}

fn application_theme(state: &Visualizer) -> Theme {
    if state.engine.config().light_mode {
        Theme::Light
    } else {
        Theme::Dark
    }
}

struct Visualizer {
    engine: RadarEngine<DisplayList>,
    started: Instant,
    visible: bool,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Poll,
    Frame(Instant),
    RecordsFetched(Result<Vec<ScanRecord>, String>),
    CanvasResized(Size),
    Pointer(Point),
    ToggleLight,
    ToggleVisible,
    PushSample,
    SamplePushed(Result<ScanAck, String>),
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        let engine = RadarEngine::mount(
            EngineConfig::default(),
            Some(DisplayList::new(640.0, 480.0)),
            Box::new(ManualScheduler::new()),
        );
        (
            Visualizer {
                engine,
                started: Instant::now(),
                visible: true,
                status: "Waiting for scan records...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_records(), Message::RecordsFetched),
        )
    }

    fn elapsed_ms(&self, at: Instant) -> f64 {
        at.saturating_duration_since(self.started).as_secs_f64() * 1000.0
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Poll => Task::perform(fetch_records(), Message::RecordsFetched),
            Message::Frame(at) => {
                let now_ms = state.elapsed_ms(at);
                state.engine.tick(now_ms);
                Task::none()
            }
            Message::RecordsFetched(Ok(records)) => {
                let count = records.len();
                state.engine.load_records(records);
                state.status = format!(
                    "Scan received: {} records / {} access points",
                    count,
                    state.engine.groups().len()
                );
                Task::none()
            }
            Message::RecordsFetched(Err(err)) => {
                state.status = format!("Scan error: {err}");
                Task::none()
            }
            Message::CanvasResized(size) => {
                if let Some(surface) = state.engine.surface_mut() {
                    surface.set_logical_size(size.width as f64, size.height as f64);
                }
                Task::none()
            }
            Message::Pointer(point) => {
                let now_ms = state.elapsed_ms(Instant::now());
                let outcome = state
                    .engine
                    .handle_pointer(point.x as f64, point.y as f64, now_ms);
                if outcome.changed() {
                    let entry = match state.engine.selected_group() {
                        Some(group) => format!("Selected {}", group.identifier()),
                        None => "Selection cleared".to_string(),
                    };
                    state.push_history(entry);
                }
                Task::none()
            }
            Message::ToggleLight => {
                let light_mode = !state.engine.config().light_mode;
                state.engine.set_light_mode(light_mode);
                Task::none()
            }
            Message::ToggleVisible => {
                state.visible = !state.visible;
                state.engine.set_visible(state.visible);
                Task::none()
            }
            Message::PushSample => Task::perform(post_sample_scan(), Message::SamplePushed),
            Message::SamplePushed(Ok(ack)) => {
                state.push_history(format!(
                    "Sample scan {}: {} records / {} groups",
                    ack.status, ack.records, ack.groups
                ));
                Task::perform(fetch_records(), Message::RecordsFetched)
            }
            Message::SamplePushed(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let commands = state
            .engine
            .surface()
            .map(|surface| surface.commands())
            .unwrap_or_default();
        let radar = Canvas::new(RadarCanvas { commands })
            .width(Length::Fill)
            .height(Length::Fill);

        let detail_lines = state
            .engine
            .detail()
            .map(|detail| detail.lines())
            .unwrap_or_else(|| vec!["Click an access point for details".to_string()]);
        let detail_column = detail_lines
            .into_iter()
            .fold(Column::new().spacing(4), |col, line| col.push(text(line).size(14)));

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let loop_label = match state.engine.state() {
            LoopState::Running => "running",
            LoopState::Paused => "paused",
            LoopState::Stopped => "stopped",
        };

        let side_column = column![
            text("Access point").size(24),
            Container::new(detail_column).padding(6),
            row![
                button(if state.engine.config().light_mode {
                    "Dark mode"
                } else {
                    "Light mode"
                })
                .on_press(Message::ToggleLight)
                .padding(8),
                button(if state.visible { "Hide" } else { "Show" })
                    .on_press(Message::ToggleVisible)
                    .padding(8),
            ]
            .spacing(8),
            button("POST sample scan")
                .on_press(Message::PushSample)
                .padding(8),
            text(format!("Redraw loop: {loop_label}")).size(14),
            text(&state.status).size(14),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(160.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(340.0));

        let layout = row![radar, side_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_records() -> Result<Vec<ScanRecord>, String> {
    let response = reqwest::get(format!("{BRIDGE_URL}/records"))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<Vec<ScanRecord>>()
        .await
        .map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Deserialize)]
struct ScanAck {
    status: String,
    #[serde(default)]
    records: usize,
    #[serde(default)]
    groups: usize,
}

/// Pushes a small dual-band scan through the bridge's ingestion route.
async fn post_sample_scan() -> Result<ScanAck, String> {
    let scan = json!({
        "networks": [
            {"ssid": "Studio", "bssid": "DC:A6:32:10:20:01", "signal_level": "-48 dBm", "channel": 6, "security": "WPA2"},
            {"ssid": "Studio", "bssid": "DC:A6:32:10:20:02", "signal_level": -57, "frequency": 5180, "security": "WPA2"},
            {"ssid": "", "bssid": "F0:9F:C2:00:00:31", "signal_level": -79, "channel": 11},
        ]
    });
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/scan"))
        .json(&scan)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        response.json::<ScanAck>().await.map_err(|e| e.to_string())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

fn color(rgba: Rgba) -> Color {
    Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn point(x: f64, y: f64) -> Point {
    Point::new(x as f32, y as f32)
}

/// Replays the engine's last recorded frame.
struct RadarCanvas<'a> {
    commands: &'a [DrawCommand],
}

impl canvas::Program<Message> for RadarCanvas<'_> {
    /// Last bounds reported to the engine.
    type State = Option<Size>;

    fn update(
        &self,
        state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                return Some(canvas::Action::publish(Message::Pointer(position)));
            }
        }
        if *state != Some(bounds.size()) {
            *state = Some(bounds.size());
            return Some(canvas::Action::publish(Message::CanvasResized(bounds.size())));
        }
        None
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        for command in self.commands {
            match command {
                DrawCommand::Clear { color: fill } => {
                    frame.fill_rectangle(Point::ORIGIN, bounds.size(), color(*fill));
                }
                DrawCommand::StrokeCircle {
                    x,
                    y,
                    radius,
                    color: stroke,
                    width,
                } => {
                    let circle = Path::circle(point(*x, *y), *radius as f32);
                    frame.stroke(
                        &circle,
                        Stroke::default()
                            .with_color(color(*stroke))
                            .with_width(*width as f32),
                    );
                }
                DrawCommand::FillCircle {
                    x,
                    y,
                    radius,
                    color: fill,
                } => {
                    frame.fill(&Path::circle(point(*x, *y), *radius as f32), color(*fill));
                }
                DrawCommand::Line {
                    from,
                    to,
                    color: stroke,
                    width,
                } => {
                    let line = Path::line(point(from.0, from.1), point(to.0, to.1));
                    frame.stroke(
                        &line,
                        Stroke::default()
                            .with_color(color(*stroke))
                            .with_width(*width as f32),
                    );
                }
                DrawCommand::FillWedge {
                    x,
                    y,
                    radius,
                    start,
                    end,
                    color: fill,
                } => {
                    let center = point(*x, *y);
                    let wedge = Path::new(|builder| {
                        builder.move_to(center);
                        builder.arc(Arc {
                            center,
                            radius: *radius as f32,
                            start_angle: Radians(*start as f32),
                            end_angle: Radians(*end as f32),
                        });
                        builder.close();
                    });
                    frame.fill(&wedge, color(*fill));
                }
                DrawCommand::Text {
                    x,
                    y,
                    content,
                    color: fill,
                    size,
                } => {
                    frame.fill_text(canvas::Text {
                        content: content.clone(),
                        position: point(*x, *y),
                        color: color(*fill),
                        size: Pixels(*size as f32),
                        ..canvas::Text::default()
                    });
                }
            }
        }

        vec![frame.into_geometry()]
    }
}
