use pairmatch_core::{AchievementId, Elapsed};
use pairmatch_protocol::{LeaderboardEntry, LeaderboardError};
use yew::prelude::*;

use crate::api;
use crate::app::Page;

#[derive(Clone, Debug, PartialEq)]
enum Leaders {
    Loading,
    Loaded(Vec<LeaderboardEntry>),
    Failed(LeaderboardError),
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct LeaderboardProps {
    pub navigate: Callback<Page>,
}

fn achievement_badges(achievements: &[AchievementId]) -> Html {
    let badge = |id: AchievementId, title: &'static str| {
        let earned = achievements.contains(&id);
        html! {
            <span class={classes!("achievement", earned.then_some("earned"))} {title}/>
        }
    };
    html! {
        <>
            {badge(AchievementId::HARD_MODE, "Игра пройдена в сложном режиме")}
            {badge(AchievementId::NO_POWERUPS, "Игра пройдена без супер-сил")}
        </>
    }
}

#[function_component]
pub(crate) fn LeaderboardView(props: &LeaderboardProps) -> Html {
    let leaders = use_state(|| Leaders::Loading);

    {
        let leaders = leaders.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::fetch_leaders().await;
                if let Err(err) = &result {
                    log::warn!("leaderboard unavailable: {}", err);
                }
                leaders.set(result.map_or_else(Leaders::Failed, Leaders::Loaded));
            });
        });
    }

    let on_start = props.navigate.reform(|_: MouseEvent| Page::SelectLevel);

    let body = match &*leaders {
        Leaders::Loading => html! { <p class="loading">{"Загрузка..."}</p> },
        Leaders::Failed(err) => html! { <p class="error">{err.to_string()}</p> },
        Leaders::Loaded(entries) => html! {
            <table>
                <tr>
                    <th>{"Позиция"}</th>
                    <th>{"Пользователь"}</th>
                    <th>{"Достижения"}</th>
                    <th>{"Время"}</th>
                </tr>
                {
                    for entries.iter().enumerate().map(|(place, entry)| html! {
                        <tr>
                            <td>{format!("# {}", place + 1)}</td>
                            <td>{entry.name.clone()}</td>
                            <td>{achievement_badges(&entry.achievements)}</td>
                            <td>{Elapsed::from_total_seconds(entry.time).to_string()}</td>
                        </tr>
                    })
                }
            </table>
        },
    };

    html! {
        <div class="leaderboard">
            <header>
                <h1>{"Лидерборд"}</h1>
                <button onclick={on_start}>{"Начать игру"}</button>
            </header>
            {body}
        </div>
    }
}
