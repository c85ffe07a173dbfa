use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Number of entries in the scenery colour palette.
pub const COLOUR_COUNT: u8 = 32;

/// A palette index usable for scenery and sign colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode)]
pub struct Colour(u8);

impl Colour {
    pub const BLACK: Colour = Colour(0);
    pub const GREY: Colour = Colour(1);
    pub const WHITE: Colour = Colour(2);
    pub const DARK_PURPLE: Colour = Colour(3);
    pub const LIGHT_PURPLE: Colour = Colour(4);
    pub const BRIGHT_PURPLE: Colour = Colour(5);
    pub const DARK_BLUE: Colour = Colour(6);
    pub const LIGHT_BLUE: Colour = Colour(7);
    pub const ICY_BLUE: Colour = Colour(8);
    pub const TEAL: Colour = Colour(9);
    pub const AQUAMARINE: Colour = Colour(10);
    pub const SATURATED_GREEN: Colour = Colour(11);
    pub const DARK_GREEN: Colour = Colour(12);
    pub const MOSS_GREEN: Colour = Colour(13);
    pub const BRIGHT_GREEN: Colour = Colour(14);
    pub const OLIVE_GREEN: Colour = Colour(15);
    pub const DARK_OLIVE_GREEN: Colour = Colour(16);
    pub const BRIGHT_YELLOW: Colour = Colour(17);
    pub const YELLOW: Colour = Colour(18);
    pub const DARK_YELLOW: Colour = Colour(19);
    pub const LIGHT_ORANGE: Colour = Colour(20);
    pub const DARK_ORANGE: Colour = Colour(21);
    pub const LIGHT_BROWN: Colour = Colour(22);
    pub const SATURATED_BROWN: Colour = Colour(23);
    pub const DARK_BROWN: Colour = Colour(24);
    pub const SALMON_PINK: Colour = Colour(25);
    pub const BORDEAUX_RED: Colour = Colour(26);
    pub const SATURATED_RED: Colour = Colour(27);
    pub const BRIGHT_RED: Colour = Colour(28);
    pub const DARK_PINK: Colour = Colour(29);
    pub const BRIGHT_PINK: Colour = Colour(30);
    pub const LIGHT_PINK: Colour = Colour(31);

    /// Returns `None` for indices outside the palette.
    pub fn new(index: u8) -> Option<Colour> {
        (index < COLOUR_COUNT).then_some(Colour(index))
    }

    /// Map a dropdown row to a colour. Rows beyond the palette are rejected.
    pub fn from_dropdown_index(index: usize) -> Option<Colour> {
        u8::try_from(index).ok().and_then(Colour::new)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 < COLOUR_COUNT
    }
}
