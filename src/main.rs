use anyhow::Context;
use chip8_vm::interpreter::config::{Config, Quirks, SpriteEdge, UnderflowPolicy, DEFAULT_CLOCK_FREQ};
use chip8_vm::interpreter::ChipState;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Run a CHIP-8 program", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions per second
    #[arg(short, long, default_value_t = DEFAULT_CLOCK_FREQ, value_parser = clap::value_parser!(u32).range(1..))]
    ips: u32,

    /// 8xy6/8xyE copy Vy into Vx before shifting
    #[arg(long)]
    shift_uses_vy: bool,

    /// Wrap sprite pixels around the screen edges instead of clipping
    #[arg(long)]
    wrap_sprites: bool,

    /// Treat RET with an empty call stack as a fatal error
    #[arg(long)]
    strict_stack: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            clock_freq: self.ips,
            quirks: Quirks {
                shift_uses_vy: self.shift_uses_vy,
                sprite_edge: if self.wrap_sprites {
                    SpriteEdge::Wrap
                } else {
                    SpriteEdge::Clip
                },
                stack_underflow: if self.strict_stack {
                    UnderflowPolicy::Fatal
                } else {
                    UnderflowPolicy::Ignore
                },
            },
        }
    }
}

fn build(args: &Args) -> anyhow::Result<ChipState> {
    let program = std::fs::read(&args.rom)
        .with_context(|| format!("cannot read ROM {}", args.rom.display()))?;
    let mut chip8_vm = ChipState::new(args.config());
    chip8_vm
        .load_rom(&program)
        .with_context(|| format!("cannot load ROM {}", args.rom.display()))?;
    log::info!("ROM loaded: {}", args.rom.display());
    Ok(chip8_vm)
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    match build(&args) {
        Ok(chip8_vm) => chip8_base::run(chip8_vm),
        Err(err) => {
            log::error!("{:#}", err);
            eprintln!("error: {:#}", err);
            std::process::exit(1);
        }
    }
}
