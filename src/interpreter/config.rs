/// Default instruction rate in Hz.
pub const DEFAULT_CLOCK_FREQ: u32 = 700;

/// How a sprite pixel that falls past the right or bottom edge is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteEdge {
    /// Drop the pixel.
    #[default]
    Clip,
    /// Wrap around to the opposite edge.
    Wrap,
}

/// What `RET` does when there is nothing to return to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderflowPolicy {
    #[default]
    Ignore,
    Fatal,
}

/// Behaviour that differs between CHIP-8 lineages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    /// 8xy6/8xyE copy Vy into Vx before shifting (COSMAC VIP).
    pub shift_uses_vy: bool,
    pub sprite_edge: SpriteEdge,
    pub stack_underflow: UnderflowPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions per second.
    pub clock_freq: u32,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_freq: DEFAULT_CLOCK_FREQ,
            quirks: Quirks::default(),
        }
    }
}
