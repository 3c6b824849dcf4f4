// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Terminal colors.

use std::fmt::Display;

use anstyle::{AnsiColor, Color as AnsiStyleColor, RgbColor, Style};

const fn rgb(r: u8, g: u8, b: u8) -> Style {
    Style::new().fg_color(Some(AnsiStyleColor::Rgb(RgbColor(r, g, b))))
}

pub const GREY: Style = rgb(0xaa, 0xaa, 0xaa);
pub const LAVENDER: Style = rgb(0xb3, 0x9d, 0xdb);
pub const MINT: Style = rgb(0x98, 0xfb, 0x98);
pub const PINK: Style = rgb(0xff, 0x69, 0xb4);
pub const RED: Style = Style::new().fg_color(Some(AnsiStyleColor::Ansi(AnsiColor::Red)));
pub const YELLOW: Style = Style::new().fg_color(Some(AnsiStyleColor::Ansi(AnsiColor::Yellow)));

fn paint(style: Style, text: impl Display) -> String {
    format!("{style}{text}{style:#}")
}

/// Colors anything displayable.
pub trait Color {
    fn grey(&self) -> String;
    fn lavender(&self) -> String;
    fn mint(&self) -> String;
    fn pink(&self) -> String;
    fn red(&self) -> String;
    fn yellow(&self) -> String;
}

impl<T: Display + ?Sized> Color for T {
    fn grey(&self) -> String {
        paint(GREY, self)
    }

    fn lavender(&self) -> String {
        paint(LAVENDER, self)
    }

    fn mint(&self) -> String {
        paint(MINT, self)
    }

    fn pink(&self) -> String {
        paint(PINK, self)
    }

    fn red(&self) -> String {
        paint(RED, self)
    }

    fn yellow(&self) -> String {
        paint(YELLOW, self)
    }
}
