use crate::config::Config;
use crate::consts;
use crate::game::Difficulty;
use crate::store::Settings;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// State shared by every screen of the application
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) settings: Settings,
}

impl Globals {
    pub(crate) fn new(config: Config) -> Globals {
        let settings = Settings::open(&config);
        Globals { config, settings }
    }
}

/// Navigation over the variants of a fieldless enum, in declaration order
pub(crate) trait EnumExt: Enum {
    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH.saturating_sub(1))
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize().checked_add(1)?;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }

    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Show `difficulty` between arrows that are hollow when there is no further
/// tier in that direction
pub(crate) fn difficulty_picker(difficulty: Difficulty) -> String {
    format!(
        "{left} {difficulty:^6} {right}",
        left = if difficulty.prev().is_some() { '◀' } else { '◁' },
        right = if difficulty.next().is_some() { '▶' } else { '▷' },
    )
}

/// Width of the text returned by [`difficulty_picker()`]
pub(crate) const DIFFICULTY_PICKER_WIDTH: u16 = 10;

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered inside `area`, shrunk to fit if
/// `area` is too small
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Difficulty::Easy, "◁  Easy  ▶")]
    #[case(Difficulty::Normal, "◀ Normal ▶")]
    #[case(Difficulty::Hard, "◀  Hard  ▷")]
    fn test_difficulty_picker(#[case] difficulty: Difficulty, #[case] s: &str) {
        let picker = difficulty_picker(difficulty);
        assert_eq!(picker, s);
        assert_eq!(
            picker.chars().count(),
            usize::from(DIFFICULTY_PICKER_WIDTH)
        );
    }

    #[test]
    fn enum_navigation() {
        assert_eq!(Difficulty::min(), Difficulty::Easy);
        assert_eq!(Difficulty::max(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.next(), Some(Difficulty::Normal));
        assert_eq!(Difficulty::Hard.next(), None);
        assert_eq!(Difficulty::Normal.prev(), Some(Difficulty::Easy));
        assert_eq!(Difficulty::Easy.prev(), None);
        assert_eq!(
            Difficulty::iter().collect::<Vec<_>>(),
            [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
        );
    }

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(20, 10), Rect::new(30, 7, 20, 10))]
    #[case(Rect::new(5, 2, 80, 24), Size::new(80, 24), Rect::new(5, 2, 80, 24))]
    #[case(Rect::new(0, 0, 100, 30), Size::new(80, 24), Rect::new(10, 3, 80, 24))]
    #[case(Rect::new(0, 0, 40, 10), Size::new(80, 24), Rect::new(0, 0, 40, 10))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] centered: Rect) {
        assert_eq!(center_rect(area, size), centered);
    }
}
