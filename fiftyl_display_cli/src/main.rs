use clap::{value_parser, Arg, ArgAction, Command};
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod commands;

/// Arguments shared by every subcommand that reads a raw data file
fn data_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("filename")
                .required(true)
                .help("Path to the raw 50L HDF5 file"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a YAML configuration file; defaults otherwise"),
        )
        .arg(
            Arg::new("map")
                .short('m')
                .long("map")
                .help("Path to a channel map CSV; the bundled default otherwise"),
        )
        .arg(
            Arg::new("savetype")
                .short('s')
                .long("savetype")
                .help("Figure format, svg or png"),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .action(ArgAction::SetTrue)
                .help("Show a progress bar while iterating records"),
        )
}

fn record_arg() -> Arg {
    Arg::new("record")
        .short('r')
        .long("record")
        .value_parser(value_parser!(usize))
        .help("Trigger record index (default 0)")
}

fn channel_arg() -> Arg {
    Arg::new("channel")
        .long("channel")
        .value_parser(value_parser!(usize))
        .default_value("24")
        .help("Detector channel")
}

fn ped_est_arg() -> Arg {
    Arg::new("ped-est")
        .long("ped-est")
        .help("Pedestal estimator: median, mean, or mode")
}

fn build_cli() -> Command {
    Command::new("fiftyl_display_cli")
        .about("Display and analysis tools for 50L raw data files")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(
            data_command("wf", "Plot one pedestal-subtracted waveform")
                .arg(record_arg())
                .arg(channel_arg()),
        )
        .subcommand(
            data_command("display", "Event-display heatmap of a trigger record")
                .arg(record_arg())
                .arg(
                    Arg::new("save-all")
                        .long("save-all")
                        .action(ArgAction::SetTrue)
                        .help("Save a display for every record")
                        .conflicts_with("record"),
                )
                .arg(
                    Arg::new("subplots")
                        .long("subplots")
                        .action(ArgAction::SetTrue)
                        .help("Render one pane per detector plane"),
                )
                .arg(
                    Arg::new("ticks")
                        .long("ticks")
                        .value_parser(value_parser!(usize))
                        .help("Limit the display to the first n time ticks"),
                ),
        )
        .subcommand(
            data_command("cosmic", "Find and display cosmic-tagged records")
                .arg(
                    Arg::new("nth")
                        .short('n')
                        .long("nth")
                        .value_parser(value_parser!(usize))
                        .default_value("1")
                        .help("Display the n-th cosmic record found"),
                )
                .arg(
                    Arg::new("save-all")
                        .long("save-all")
                        .action(ArgAction::SetTrue)
                        .help("Save a display for every cosmic record"),
                ),
        )
        .subcommand(
            data_command("rms", "Per-channel RMS of a record or the whole file")
                .arg(record_arg())
                .arg(
                    Arg::new("avg")
                        .long("avg")
                        .action(ArgAction::SetTrue)
                        .help("Average the RMS over every record (the default)")
                        .conflicts_with("record"),
                ),
        )
        .subcommand(data_command(
            "fft",
            "FFT magnitude averaged over records and a channel range",
        ))
        .subcommand(
            data_command("running-sum", "Cumulative sum of one waveform")
                .arg(record_arg())
                .arg(channel_arg()),
        )
        .subcommand(
            data_command("sum", "Accumulate every record into one heatmap")
                .arg(ped_est_arg())
                .arg(
                    Arg::new("abs")
                        .long("abs")
                        .action(ArgAction::SetTrue)
                        .help("Accumulate absolute values"),
                ),
        )
        .subcommand(
            data_command(
                "sum-filtered",
                "Accumulate records with samples outside the threshold band zeroed",
            )
            .arg(ped_est_arg())
            .arg(
                Arg::new("abs")
                    .long("abs")
                    .action(ArgAction::SetTrue)
                    .help("Accumulate absolute values"),
            )
            .arg(
                Arg::new("subplots")
                    .long("subplots")
                    .action(ArgAction::SetTrue)
                    .help("Render one pane per detector plane"),
            ),
        )
        .subcommand(
            data_command(
                "extrema",
                "Histogram the per-record max and windowed min of one channel",
            )
            .arg(channel_arg()),
        )
        .subcommand(
            data_command("charge", "Peak-area integration for one channel group")
                .arg(channel_arg())
                .arg(
                    Arg::new("induction")
                        .long("induction")
                        .action(ArgAction::SetTrue)
                        .help("Require an induction-plane coincidence to keep a peak"),
                ),
        )
        .subcommand(
            data_command("kdist", "k-distance plot of one record for DBSCAN studies")
                .arg(record_arg())
                .arg(
                    Arg::new("k")
                        .short('k')
                        .value_parser(value_parser!(usize))
                        .default_value("4")
                        .help("Neighbor rank to take the distance to"),
                ),
        )
        .subcommand(
            Command::new("new")
                .about("Make a template configuration yaml file")
                .arg(
                    Arg::new("path")
                        .short('p')
                        .long("path")
                        .help("Path to the file (default config.yml)"),
                ),
        )
}

fn main() {
    // Create a cli
    let matches = build_cli().get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    let pb_manager = MultiProgress::new();

    LogWrapper::new(pb_manager.clone(), logger)
        .try_init()
        .expect("Could not create logging/progress!");

    let result = match matches.subcommand() {
        Some(("wf", sub)) => commands::waveform(sub),
        Some(("display", sub)) => commands::display(sub, &pb_manager),
        Some(("cosmic", sub)) => commands::cosmic_display(sub, &pb_manager),
        Some(("rms", sub)) => commands::rms(sub, &pb_manager),
        Some(("fft", sub)) => commands::fft(sub, &pb_manager),
        Some(("running-sum", sub)) => commands::running_sum(sub),
        Some(("sum", sub)) => commands::sum(sub, &pb_manager),
        Some(("sum-filtered", sub)) => commands::sum_filtered(sub, &pb_manager),
        Some(("extrema", sub)) => commands::extrema(sub, &pb_manager),
        Some(("charge", sub)) => commands::charge(sub, &pb_manager),
        Some(("kdist", sub)) => commands::kdist_analysis(sub),
        Some(("new", sub)) => commands::new_config(sub),
        _ => unreachable!(),
    };

    match result {
        Ok(()) => log::info!("Done."),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The single-channel analyses default to the traditional viewing
    /// channel 24
    #[test]
    fn test_channel_defaults() {
        for subcommand in ["wf", "running-sum", "extrema", "charge"] {
            let matches = build_cli()
                .try_get_matches_from(["fiftyl_display_cli", subcommand, "run.hdf5"])
                .unwrap();
            let (_, sub) = matches.subcommand().unwrap();
            assert_eq!(sub.get_one::<usize>("channel"), Some(&24));
        }
    }

    #[test]
    fn test_rms_flags_are_exclusive() {
        assert!(build_cli()
            .try_get_matches_from([
                "fiftyl_display_cli",
                "rms",
                "run.hdf5",
                "--record",
                "1",
                "--avg"
            ])
            .is_err());
    }
}
