//! Iced canvas program that draws the chart through [`graph_renderer`].

use crate::monitor::ChartData;
use graph_renderer::{plot_area, render_chart, Anchor, Label, Margins, Point, Rect, Stroke, Surface};
use graph_theme::{Color, Theme};
use iced::{
    alignment,
    font,
    mouse,
    widget::canvas::{self, Frame, Geometry, LineDash, Path},
    Font, Pixels, Rectangle, Renderer, Size,
};

/// Dash pattern for grid lines: 2px on, 3px off.
static DASH: [f32; 2] = [2.0, 3.0];

pub struct ChartCanvas<'a> {
    pub data:  ChartData,
    pub theme: &'a Theme,
}

impl<Message> canvas::Program<Message> for ChartCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &(),
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            iced::Point::ORIGIN,
            bounds.size(),
            self.theme.background.to_iced(),
        );

        let area = plot_area(bounds.width, bounds.height, Margins::DEFAULT);
        render_chart(&mut FrameSurface(&mut frame), area, &self.data.as_input(), self.theme);

        vec![frame.into_geometry()]
    }
}

// ── Surface adapter ───────────────────────────────────────────────────────────

struct FrameSurface<'a>(&'a mut Frame);

fn to_point(p: Point) -> iced::Point {
    iced::Point::new(p.x, p.y)
}

fn to_stroke(stroke: Stroke) -> canvas::Stroke<'static> {
    let base = canvas::Stroke::default()
        .with_color(stroke.color.to_iced())
        .with_width(stroke.width);
    if stroke.dashed {
        canvas::Stroke {
            line_dash: LineDash { segments: &DASH, offset: 0 },
            ..base
        }
    } else {
        base
    }
}

impl Surface for FrameSurface<'_> {
    fn rectangle(&mut self, rect: Rect, stroke: Option<Stroke>, fill: Option<Color>) {
        let path = Path::rectangle(
            iced::Point::new(rect.left, rect.top),
            Size::new(rect.width(), rect.height()),
        );
        if let Some(color) = fill {
            self.0.fill(&path, color.to_iced());
        }
        if let Some(stroke) = stroke {
            self.0.stroke(&path, to_stroke(stroke));
        }
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let path = Path::new(|b| {
            b.move_to(to_point(*first));
            for p in rest {
                b.line_to(to_point(*p));
            }
        });
        self.0.stroke(&path, to_stroke(stroke));
    }

    fn polygon(&mut self, points: &[Point], fill: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let path = Path::new(|b| {
            b.move_to(to_point(*first));
            for p in rest {
                b.line_to(to_point(*p));
            }
            b.close();
        });
        self.0.fill(&path, fill.to_iced());
    }

    fn text(&mut self, label: Label) {
        let (align_x, align_y) = match label.anchor {
            Anchor::East  => (alignment::Horizontal::Right,  alignment::Vertical::Center),
            Anchor::West  => (alignment::Horizontal::Left,   alignment::Vertical::Center),
            Anchor::North => (alignment::Horizontal::Center, alignment::Vertical::Top),
            Anchor::South => (alignment::Horizontal::Center, alignment::Vertical::Bottom),
        };
        let font = if label.bold {
            Font { weight: font::Weight::Bold, ..Font::DEFAULT }
        } else {
            Font::DEFAULT
        };

        self.0.fill_text(canvas::Text {
            content:  label.content,
            position: to_point(label.position),
            color:    label.color.to_iced(),
            size:     Pixels(label.size),
            font,
            align_x:  align_x.into(),
            align_y,
            ..canvas::Text::default()
        });
    }
}
