use pairmatch_core::{Elapsed, GameSummary};
use pairmatch_protocol::LeaderboardEntry;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api;
use crate::app::Page;

#[derive(Clone, Debug, PartialEq)]
enum Submission {
    Editing,
    Sending,
    Done,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct EndGameProps {
    pub summary: GameSummary,
    pub on_restart: Callback<()>,
    pub navigate: Callback<Page>,
}

#[function_component]
pub(crate) fn EndGameModal(props: &EndGameProps) -> Html {
    let summary = props.summary;
    let worthy = summary.is_leaderboard_worthy();

    let name = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submission = use_state(|| Submission::Editing);

    let oninput = {
        let name = name.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
            error.set(None);
        })
    };

    let on_submit = {
        let name = name.clone();
        let error = error.clone();
        let submission = submission.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submission != Submission::Editing {
                return;
            }

            let entry = match LeaderboardEntry::from_summary(&name, &summary) {
                Ok(entry) => entry,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };

            submission.set(Submission::Sending);
            let error = error.clone();
            let submission = submission.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::add_leader(&entry).await {
                    Ok(saved) => {
                        log::info!("leader saved: {} in {}s", saved.name, saved.time);
                        submission.set(Submission::Done);
                    }
                    Err(err) => {
                        log::warn!("leader not saved: {}", err);
                        error.set(Some(err.to_string()));
                        submission.set(Submission::Editing);
                    }
                }
            });
        })
    };

    let on_restart = props.on_restart.reform(|_: MouseEvent| ());
    let on_leaderboard = props.navigate.reform(|_: MouseEvent| Page::Leaderboard);

    let title = if worthy {
        "Вы попали на лидерборд"
    } else if summary.won {
        "Вы победили!"
    } else {
        "Вы проиграли!"
    };
    let time: Elapsed = summary.elapsed;

    html! {
        <div class="modal-backdrop">
            <div class={classes!("modal", if summary.won { "won" } else { "lost" })}>
                <h2>{title}</h2>
                if worthy {
                    if *submission == Submission::Done {
                        <p class="saved">{"Результат сохранен"}</p>
                    } else {
                        <form onsubmit={on_submit}>
                            <input
                                type="text"
                                placeholder="Пользователь"
                                value={(*name).clone()}
                                {oninput}
                                disabled={*submission == Submission::Sending}
                            />
                            <button type="submit" disabled={*submission == Submission::Sending}>
                                {"Добавить"}
                            </button>
                        </form>
                    }
                    if let Some(message) = &*error {
                        <p class="error">{message.clone()}</p>
                    }
                }
                <p class="description">{"Затраченное время:"}</p>
                <div class="time">{time.to_string()}</div>
                <button onclick={on_restart}>{"Начать сначала"}</button>
                <button class="link" onclick={on_leaderboard}>{"Перейти к лидерборду"}</button>
            </div>
        </div>
    }
}
