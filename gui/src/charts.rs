use analysis::{Gauge, HistogramBin, TimelinePoint};
use iced::alignment::{Horizontal, Vertical};
use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

const PADDING: f32 = 36.0;
const BAR_COLOR: Color = Color { r: 0.27, g: 0.51, b: 0.71, a: 1.0 };
const LINE_COLOR: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
const AXIS_COLOR: Color = Color { r: 0.4, g: 0.4, b: 0.4, a: 1.0 };
const GRID_COLOR: Color = Color { r: 0.85, g: 0.85, b: 0.85, a: 1.0 };
const GAUGE_FILL: Color = Color { r: 0.0, g: 0.5, b: 0.0, a: 1.0 };
const GAUGE_REST: Color = Color { r: 0.83, g: 0.83, b: 0.83, a: 1.0 };
const GAUGE_EDGE: Color = Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 };

/// Linear map of `value` from `domain` onto `range`; a degenerate domain maps
/// to the middle of the range.
pub fn scale(value: f64, domain: (f64, f64), range: (f32, f32)) -> f32 {
    let span = domain.1 - domain.0;
    if span == 0.0 {
        return (range.0 + range.1) / 2.0;
    }
    let t = ((value - domain.0) / span) as f32;
    range.0 + (range.1 - range.0) * t
}

fn label(content: String, position: Point, size: f32, horizontal: Horizontal) -> Text {
    Text {
        content,
        position,
        color: AXIS_COLOR,
        size: size.into(),
        horizontal_alignment: horizontal,
        vertical_alignment: Vertical::Center,
        ..Text::default()
    }
}

fn plot_area(bounds: Rectangle) -> Rectangle {
    Rectangle {
        x: PADDING,
        y: PADDING / 2.0,
        width: (bounds.width - PADDING * 1.5).max(1.0),
        height: (bounds.height - PADDING * 1.5).max(1.0),
    }
}

fn draw_axes(frame: &mut Frame, area: Rectangle) {
    let origin = Point::new(area.x, area.y + area.height);
    frame.stroke(
        &Path::line(Point::new(area.x, area.y), origin),
        Stroke::default().with_color(AXIS_COLOR).with_width(1.0),
    );
    frame.stroke(
        &Path::line(origin, Point::new(area.x + area.width, origin.y)),
        Stroke::default().with_color(AXIS_COLOR).with_width(1.0),
    );
}

#[derive(Debug, Clone)]
pub struct HistogramChart {
    bins: Vec<HistogramBin>,
}

impl HistogramChart {
    pub fn new(bins: Vec<HistogramBin>) -> Self {
        Self { bins }
    }
}

impl<Message> canvas::Program<Message> for HistogramChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let area = plot_area(bounds);
        draw_axes(&mut frame, area);

        let (Some(first), Some(last)) = (self.bins.first(), self.bins.last()) else {
            return vec![frame.into_geometry()];
        };

        let max_count = self.bins.iter().map(|bin| bin.count).max().unwrap_or(0).max(1);
        let bar_width = area.width / self.bins.len() as f32;
        let baseline = area.y + area.height;

        for (i, bin) in self.bins.iter().enumerate() {
            let height = scale(bin.count as f64, (0.0, max_count as f64), (0.0, area.height));
            if height <= 0.0 {
                continue;
            }
            let bar = Path::rectangle(
                Point::new(area.x + bar_width * i as f32, baseline - height),
                Size::new(bar_width, height),
            );
            frame.fill(&bar, BAR_COLOR);
            frame.stroke(&bar, Stroke::default().with_color(Color::WHITE).with_width(1.0));
        }

        frame.fill_text(label(
            format!("{:.2}", first.start),
            Point::new(area.x, baseline + 12.0),
            12.0,
            Horizontal::Left,
        ));
        frame.fill_text(label(
            format!("{:.2}", last.end),
            Point::new(area.x + area.width, baseline + 12.0),
            12.0,
            Horizontal::Right,
        ));
        frame.fill_text(label(
            max_count.to_string(),
            Point::new(area.x - 6.0, area.y),
            12.0,
            Horizontal::Right,
        ));

        vec![frame.into_geometry()]
    }
}

#[derive(Debug, Clone)]
pub struct TimelineChart {
    points: Vec<TimelinePoint>,
}

impl TimelineChart {
    pub fn new(points: Vec<TimelinePoint>) -> Self {
        Self { points }
    }

    fn time_domain(&self) -> (f64, f64) {
        let millis = |point: &TimelinePoint| point.published_at.timestamp_millis() as f64;
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (millis(first), millis(last)),
            _ => (0.0, 0.0),
        }
    }
}

impl<Message> canvas::Program<Message> for TimelineChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let area = plot_area(bounds);
        draw_axes(&mut frame, area);

        let y_range = (area.y + area.height, area.y);
        let zero = scale(0.0, (-1.0, 1.0), y_range);
        frame.stroke(
            &Path::line(Point::new(area.x, zero), Point::new(area.x + area.width, zero)),
            Stroke::default().with_color(GRID_COLOR).with_width(1.0),
        );
        frame.fill_text(label("1".to_string(), Point::new(area.x - 6.0, area.y), 12.0, Horizontal::Right));
        frame.fill_text(label("0".to_string(), Point::new(area.x - 6.0, zero), 12.0, Horizontal::Right));
        frame.fill_text(label(
            "-1".to_string(),
            Point::new(area.x - 6.0, area.y + area.height),
            12.0,
            Horizontal::Right,
        ));

        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return vec![frame.into_geometry()];
        };

        let domain = self.time_domain();
        let x_range = (area.x, area.x + area.width);
        let positions: Vec<Point> = self
            .points
            .iter()
            .map(|point| {
                Point::new(
                    scale(point.published_at.timestamp_millis() as f64, domain, x_range),
                    scale(point.polarity, (-1.0, 1.0), y_range),
                )
            })
            .collect();

        let line = Path::new(|builder| {
            builder.move_to(positions[0]);
            for position in &positions[1..] {
                builder.line_to(*position);
            }
        });
        frame.stroke(&line, Stroke::default().with_color(LINE_COLOR).with_width(1.5));
        for position in &positions {
            frame.fill(&Path::circle(*position, 2.5), LINE_COLOR);
        }

        let baseline = area.y + area.height + 12.0;
        frame.fill_text(label(
            first.published_at.format("%Y-%m-%d %H:%M").to_string(),
            Point::new(area.x, baseline),
            12.0,
            Horizontal::Left,
        ));
        frame.fill_text(label(
            last.published_at.format("%Y-%m-%d %H:%M").to_string(),
            Point::new(area.x + area.width, baseline),
            12.0,
            Horizontal::Right,
        ));

        vec![frame.into_geometry()]
    }
}

#[derive(Debug, Clone)]
pub struct GaugeChart {
    gauge: Gauge,
}

impl GaugeChart {
    pub fn new(gauge: Gauge) -> Self {
        Self { gauge }
    }
}

/// Turns a y-up outline around the origin into a closed path around `center`.
fn wedge_path(outline: &[(f64, f64)], center: Point) -> Option<Path> {
    let (first, rest) = outline.split_first()?;
    let to_screen = |(x, y): (f64, f64)| Point::new(center.x + x as f32, center.y - y as f32);
    Some(Path::new(|builder| {
        builder.move_to(to_screen(*first));
        for point in rest {
            builder.line_to(to_screen(*point));
        }
        builder.close();
    }))
}

impl<Message> canvas::Program<Message> for GaugeChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = bounds.width.min(bounds.height) as f64 * 0.4;
        let edge = Stroke::default().with_color(GAUGE_EDGE).with_width(2.0);

        frame.fill(&Path::circle(center, radius as f32), Color::WHITE);

        for (outline, color) in [
            (self.gauge.filled_wedge((0.0, 0.0), radius), GAUGE_FILL),
            (self.gauge.remainder_wedge((0.0, 0.0), radius), GAUGE_REST),
        ] {
            if let Some(path) = wedge_path(&outline, center) {
                frame.fill(&path, color);
                frame.stroke(&path, edge.clone());
            }
        }

        frame.fill_text(Text {
            content: self.gauge.label.clone(),
            position: center,
            color: Color::BLACK,
            size: 20.0_f32.into(),
            horizontal_alignment: Horizontal::Center,
            vertical_alignment: Vertical::Center,
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }
}
