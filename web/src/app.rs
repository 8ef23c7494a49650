use pairmatch_core::{GameConfig, GameMode, PairCount};
use yew::prelude::*;

use crate::game::GameView;
use crate::leaderboard::LeaderboardView;
use crate::level::LevelSelectView;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Page {
    SelectLevel,
    Game(PairCount),
    Leaderboard,
}

/// Difficulty preference shared by every page, handed to the engine when a game starts.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ModeContext {
    pub mode: GameMode,
    pub set_mode: Callback<GameMode>,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct AppProps {
    pub initial_page: Page,
    #[prop_or_default]
    pub easy: bool,
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[function_component]
pub(crate) fn App(props: &AppProps) -> Html {
    let page = {
        let initial_page = props.initial_page.clone();
        use_state(move || initial_page)
    };
    let mode = {
        let easy = props.easy;
        use_state(move || if easy { GameMode::Easy } else { GameMode::Hard })
    };

    let navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| {
            log::debug!("navigate: {:?}", next);
            page.set(next);
        })
    };
    let context = ModeContext {
        mode: *mode,
        set_mode: {
            let mode = mode.clone();
            Callback::from(move |next: GameMode| mode.set(next))
        },
    };

    let content = match &*page {
        Page::SelectLevel => html! { <LevelSelectView navigate={navigate.clone()}/> },
        Page::Leaderboard => html! { <LeaderboardView navigate={navigate.clone()}/> },
        Page::Game(pairs) => match GameConfig::new(*pairs, *mode) {
            Ok(config) => html! {
                <GameView key={format!("{}-{:?}", pairs, *mode)} {config} seed={props.seed} navigate={navigate.clone()}/>
            },
            Err(err) => {
                log::warn!("cannot start game: {}", err);
                let back = navigate.reform(|_: MouseEvent| Page::SelectLevel);
                html! {
                    <div class="error">
                        <p>{err.to_string()}</p>
                        <button onclick={back}>{"НАЗАД"}</button>
                    </div>
                }
            }
        },
    };

    html! {
        <ContextProvider<ModeContext> {context}>
            {content}
        </ContextProvider<ModeContext>>
    }
}
