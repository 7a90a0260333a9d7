use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The game's name, flanked by a snake and its food
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Title;

impl Title {
    const NAME: &'static str = "S N A K E   A R C A D E";
}

impl Widget for Title {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body = consts::SNAKE_BODY_SYMBOL.to_string().repeat(4);
        Line::from_iter([
            Span::styled(body, consts::SNAKE_STYLE),
            Span::styled(
                consts::SNAKE_HEAD_RIGHT_SYMBOL.to_string(),
                consts::SNAKE_STYLE,
            ),
            Span::raw("   "),
            Span::styled(Self::NAME, consts::TITLE_STYLE),
            Span::raw("   "),
            Span::styled(consts::FOOD_SYMBOL.to_string(), consts::FOOD_STYLE),
        ])
        .centered()
        .render(area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 8;
    pub(super) const WIDTH: u16 = 20;
}

fn keys_line(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
    let mut line = Line::from(prefix);
    for (i, k) in keys.into_iter().enumerate() {
        if i > 0 {
            line.push_span(" ");
        }
        line.push_span(Span::styled(k, consts::KEY_STYLE));
    }
    line
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            keys_line("       ", ["←", "↓", "↑", "→"]),
            keys_line("   or: ", ["h", "j", "k", "l"]),
            keys_line("   or: ", ["a", "s", "w", "d"]),
            keys_line("   or: ", ["4", "2", "8", "6"]),
            Line::from_iter([
                Span::raw("Pause: "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(" or "),
                Span::styled("p", consts::KEY_STYLE),
            ]),
            Line::from("Eat the food, but"),
            Line::from("don't hit yourself!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
