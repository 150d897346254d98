//! Effect parameter model and the effect assignment grammar.
//!
//! An assignment is a comma-separated literal `"<shapeCode>,<args>[,layer]"`
//! produced by the configuration collaborator. Parsing is all-or-nothing:
//! malformed or missing arguments reject the whole assignment and leave any
//! previous assignment untouched.

use core::fmt::Write;

use crate::color::{BLACK, Rgb};

/// Region and action name storage.
pub type Name = heapless::String<32>;

/// Maximum serialized length of an assignment literal.
pub type Literal = heapless::String<96>;

/// Closed enumeration of animation shapes.
///
/// Discriminants are fixed by the assignment grammar and must not be
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectShape {
    Transparent = 0,
    Off,
    Static,
    Blink,
    Alternate,
    ColorWipe,
    Breathe,
    Fade,
    Scan,
    Rainbow,
    RainbowCycle,
    ColorChase,
    TheaterChase,
    TheaterChaseRainbow,
    Twinkle,
    Sparkle,
    Battery,
}

impl EffectShape {
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Transparent,
            1 => Self::Off,
            2 => Self::Static,
            3 => Self::Blink,
            4 => Self::Alternate,
            5 => Self::ColorWipe,
            6 => Self::Breathe,
            7 => Self::Fade,
            8 => Self::Scan,
            9 => Self::Rainbow,
            10 => Self::RainbowCycle,
            11 => Self::ColorChase,
            12 => Self::TheaterChase,
            13 => Self::TheaterChaseRainbow,
            14 => Self::Twinkle,
            15 => Self::Sparkle,
            16 => Self::Battery,
            _ => return None,
        })
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Shapes that paint a fixed frame once and then idle.
    pub const fn is_background(self) -> bool {
        matches!(self, Self::Static | Self::Off)
    }
}

/// One color argument of an assignment.
///
/// Exactly one of the three modes is active: a literal color, a uniformly
/// random color per resolution, or the rotating hue wheel driven by the
/// scheduler step counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOption {
    Fixed(Rgb),
    Random,
    Rainbow,
}

impl Default for ColorOption {
    fn default() -> Self {
        Self::Fixed(BLACK)
    }
}

/// A complete effect assignment for one region.
///
/// Replaced wholesale when a new assignment targets the same region; never
/// partially mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingParameters {
    pub region: Name,
    pub shape: EffectShape,
    pub first: ColorOption,
    pub second: ColorOption,
    pub third: ColorOption,
    /// Shape-dependent duration in milliseconds.
    pub duration: u32,
    /// Compositing priority; higher layers overwrite lower ones.
    pub layer: u8,
    /// Reserved repeat bound carried from configuration; not interpreted by
    /// the algorithm library.
    pub limit: Option<u32>,
}

/// Rejection reasons for a malformed assignment literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    UnknownShape(u8),
    MissingArguments(EffectShape),
    InvalidColor,
    InvalidNumber,
    NameTooLong,
}

impl LightingParameters {
    /// Build an assignment with everything defaulted except region and shape.
    pub fn new(region: &str, shape: EffectShape) -> Result<Self, ParseError> {
        let region = Name::try_from(region).map_err(|()| ParseError::NameTooLong)?;
        Ok(Self {
            region,
            shape,
            first: ColorOption::default(),
            second: ColorOption::default(),
            third: ColorOption::default(),
            duration: 0,
            layer: 0,
            limit: None,
        })
    }

    /// Parse an assignment literal for `region`.
    ///
    /// The literal carries everything but the region name, which comes from
    /// the enclosing action binding.
    pub fn parse(region: &str, literal: &str) -> Result<Self, ParseError> {
        let mut parts: heapless::Vec<&str, 8> = heapless::Vec::new();
        for part in literal.split(',') {
            if parts.push(part.trim()).is_err() {
                return Err(ParseError::InvalidNumber);
            }
        }

        let code: u8 = parts
            .first()
            .and_then(|p| p.parse().ok())
            .ok_or(ParseError::InvalidNumber)?;
        let shape = EffectShape::from_code(code).ok_or(ParseError::UnknownShape(code))?;
        let mut params = Self::new(region, shape)?;

        let args = &parts[1..];
        let layer_at = match shape {
            EffectShape::Static => {
                if args.is_empty() {
                    return Err(ParseError::MissingArguments(shape));
                }
                params.first = parse_color(args[0])?;
                1
            }
            EffectShape::Blink
            | EffectShape::Alternate
            | EffectShape::ColorWipe
            | EffectShape::Breathe
            | EffectShape::Fade
            | EffectShape::Scan
            | EffectShape::TheaterChase
            | EffectShape::Twinkle
            | EffectShape::Sparkle => {
                if args.len() < 3 {
                    return Err(ParseError::MissingArguments(shape));
                }
                params.first = parse_color(args[0])?;
                params.second = parse_color(args[1])?;
                params.duration = parse_number(args[2])?;
                3
            }
            EffectShape::ColorChase => {
                if args.len() < 4 {
                    return Err(ParseError::MissingArguments(shape));
                }
                params.first = parse_color(args[0])?;
                params.second = parse_color(args[1])?;
                params.third = parse_color(args[2])?;
                params.duration = parse_number(args[3])?;
                4
            }
            EffectShape::Rainbow | EffectShape::RainbowCycle | EffectShape::TheaterChaseRainbow => {
                if args.is_empty() {
                    return Err(ParseError::MissingArguments(shape));
                }
                params.duration = parse_number(args[0])?;
                1
            }
            EffectShape::Transparent | EffectShape::Off | EffectShape::Battery => 0,
        };

        if let Some(layer) = args.get(layer_at) {
            params.layer = layer.parse().map_err(|_| ParseError::InvalidNumber)?;
        }

        Ok(params)
    }

    /// Serialize back to the canonical assignment literal.
    ///
    /// The layer is always emitted, so a round-tripped literal parses to an
    /// identical assignment.
    pub fn to_literal(&self) -> Literal {
        let mut out = Literal::new();
        // Writes cannot fail: Literal is sized for the longest assignment.
        let _ = write!(out, "{}", self.shape.code());
        match self.shape {
            EffectShape::Static => {
                write_color(&mut out, self.first);
            }
            EffectShape::Blink
            | EffectShape::Alternate
            | EffectShape::ColorWipe
            | EffectShape::Breathe
            | EffectShape::Fade
            | EffectShape::Scan
            | EffectShape::TheaterChase
            | EffectShape::Twinkle
            | EffectShape::Sparkle => {
                write_color(&mut out, self.first);
                write_color(&mut out, self.second);
                let _ = write!(out, ",{}", self.duration);
            }
            EffectShape::ColorChase => {
                write_color(&mut out, self.first);
                write_color(&mut out, self.second);
                write_color(&mut out, self.third);
                let _ = write!(out, ",{}", self.duration);
            }
            EffectShape::Rainbow | EffectShape::RainbowCycle | EffectShape::TheaterChaseRainbow => {
                let _ = write!(out, ",{}", self.duration);
            }
            EffectShape::Transparent | EffectShape::Off | EffectShape::Battery => {}
        }
        let _ = write!(out, ",{}", self.layer);
        out
    }
}

fn parse_color(arg: &str) -> Result<ColorOption, ParseError> {
    match arg {
        "random" => return Ok(ColorOption::Random),
        "rainbow" => return Ok(ColorOption::Rainbow),
        _ => {}
    }

    let hex = arg.strip_prefix('#').ok_or(ParseError::InvalidColor)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ParseError::InvalidColor);
    }
    let component = |range: core::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ParseError::InvalidColor)
    };
    Ok(ColorOption::Fixed(Rgb::new(
        component(0..2)?,
        component(2..4)?,
        component(4..6)?,
    )))
}

fn parse_number(arg: &str) -> Result<u32, ParseError> {
    arg.parse().map_err(|_| ParseError::InvalidNumber)
}

fn write_color(out: &mut Literal, option: ColorOption) {
    let _ = match option {
        ColorOption::Fixed(c) => write!(out, ",#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
        ColorOption::Random => write!(out, ",random"),
        ColorOption::Rainbow => write!(out, ",rainbow"),
    };
}
