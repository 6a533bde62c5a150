#![forbid(unsafe_code)]

//! fanstack demo binary entry point.
//!
//! Loads the portfolio, then drives the certifications card stack with its
//! auto-advance timer for a fixed number of ticks, printing each change.

use std::time::Duration;

use fanstack_core::logging::{self, LogConfig};
use fanstack_core::motion::MotionPreference;
use fanstack_portfolio::cli::{self, Command, Opts};
use fanstack_portfolio::{Portfolio, certifications_stack_config, render_resume};
use fanstack_runtime::{CardStackController, FileStore, MemoryStore, SectionStore, TickWait};
use fanstack_widgets::CardStackItem;

fn main() {
    let opts = match Opts::parse() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Ok(Command::Version) => {
            println!("fanstack-demo {}", cli::VERSION);
            return;
        }
        Err(e) => {
            eprintln!("{e}\n\n{}", cli::HELP_TEXT);
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init(&LogConfig::from_env()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let store: Box<dyn SectionStore> = match &opts.store {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };
    if !store.is_available() {
        eprintln!("Store {} is not available", store.name());
        std::process::exit(1);
    }
    let portfolio = Portfolio::new(store);

    if opts.print_resume {
        print!("{}", render_resume(&portfolio.resume()));
        return;
    }

    run_stack(&portfolio, &opts);
}

fn run_stack(portfolio: &Portfolio<Box<dyn SectionStore>>, opts: &Opts) {
    let certifications = portfolio.certifications();
    let config = certifications_stack_config()
        .auto_advance(true, Duration::from_millis(opts.interval_ms));
    let motion = if opts.reduced_motion {
        MotionPreference::Reduced
    } else {
        MotionPreference::detect()
    };

    let mut stack = CardStackController::new(certifications.card_items(), config)
        .with_motion(motion)
        .with_on_change(Box::new(|index: usize, item: &CardStackItem| {
            println!("[{index}] {}", item.title);
        }));
    stack.mount();
    println!("{}", stack.dots().format(80));

    let wait = Duration::from_millis(opts.interval_ms.max(700) * 2);
    let mut seen = 0;
    while seen < opts.ticks {
        if !stack.timer_running() {
            println!("auto-advance is off");
            break;
        }
        match stack.wait_for_tick(wait) {
            TickWait::Advanced => {
                seen += 1;
                println!("{}", stack.dots().format(80));
            }
            TickWait::Held => {
                println!("reached the last card");
                break;
            }
            TickWait::TimedOut => {
                tracing::warn!(seen, "no tick arrived in time");
                break;
            }
        }
    }
    stack.unmount();
}
