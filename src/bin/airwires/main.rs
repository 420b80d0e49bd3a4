use std::{
    collections::BTreeSet,
    fs::File,
    io::{self, BufWriter, Write},
};

use airwires::{airwire::Airwires, board::Board, settings::AirwireSettings};
use anyhow::{anyhow, Context};
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Cli::parse();

    let board = Board::load_from_file(&args.input)
        .with_context(|| format!("failed to load board from {}", args.input.display()))?;

    let mut settings = if let Some(config) = &args.config {
        AirwireSettings::load_from_file(config)
            .with_context(|| format!("failed to load settings from {}", config.display()))?
    } else {
        AirwireSettings::default()
    };
    settings.fast |= args.fast;

    let mut airwires = Airwires::new(settings);

    if args.nets.is_empty() {
        airwires.update_all(&board);
    } else {
        let nets = args
            .nets
            .iter()
            .map(|netname| {
                board
                    .netname_net(netname)
                    .ok_or_else(|| anyhow!("board has no net named {:?}", netname))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        airwires.update_nets(&board, &nets);
    }

    log::info!("computed {} airwires", airwires.len());

    if let Some(output) = &args.output {
        let file = File::create(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, airwires.airwires())?;
        writer.flush()?;
    } else {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, airwires.airwires())?;
        writeln!(stdout)?;
    }

    Ok(())
}
