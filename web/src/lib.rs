use clap::Parser;
use pairmatch_core::PairCount;
use wasm_bindgen::prelude::*;

mod api;
mod app;
mod end_game;
mod game;
mod leaderboard;
mod level;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip the level selection and play with this many pairs
    #[arg(short, long)]
    pairs: Option<PairCount>,

    /// Start with easy mode enabled
    #[arg(short, long)]
    easy: bool,

    /// Open the leaderboard
    #[arg(short, long)]
    leaderboard: bool,
}

impl Args {
    fn initial_page(&self) -> app::Page {
        if self.leaderboard {
            app::Page::Leaderboard
        } else if let Some(pairs) = self.pairs {
            app::Page::Game(pairs)
        } else {
            app::Page::SelectLevel
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    let props = app::AppProps {
        initial_page: args.initial_page(),
        easy: args.easy,
        seed: args.seed,
    };

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, props).render();
}
