use crate::colors::Color;

/// Visual settings for the window surrounding the chart.
#[derive(Debug, Clone, Copy)]
pub struct WindowStyle {
    pub background: Color,
    /// Status line and button label colour.
    pub foreground: Color,
}

impl WindowStyle {
    /// Convert into the application-wide Iced style.
    pub fn to_iced(self) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.background.to_iced(),
            text_color:       self.foreground.to_iced(),
        }
    }
}
