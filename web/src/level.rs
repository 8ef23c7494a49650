use pairmatch_core::{GameConfig, GameMode};
use yew::prelude::*;

use crate::app::{ModeContext, Page};

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct LevelSelectProps {
    pub navigate: Callback<Page>,
}

#[function_component]
pub(crate) fn LevelSelectView(props: &LevelSelectProps) -> Html {
    let level = use_state(|| GameConfig::LEVELS[0]);
    let context = use_context::<ModeContext>().expect("mode context should be provided");
    let easy = context.mode.is_easy();

    let on_toggle_mode = {
        let set_mode = context.set_mode.clone();
        Callback::from(move |_: Event| {
            set_mode.emit(if easy { GameMode::Hard } else { GameMode::Easy });
        })
    };
    let on_start = {
        let level = *level;
        props.navigate.reform(move |_: MouseEvent| Page::Game(level))
    };
    let on_leaderboard = props.navigate.reform(|_: MouseEvent| Page::Leaderboard);

    html! {
        <div class="select-level">
            <h1>{"Выбери сложность"}</h1>
            <p class="hint">{format!("На этом уровне Вам необходимо угадать {} пар карт", *level)}</p>
            <ul class="levels">
                {
                    for GameConfig::LEVELS.iter().enumerate().map(|(i, &pairs)| {
                        let onchange = {
                            let level = level.clone();
                            Callback::from(move |_: Event| level.set(pairs))
                        };
                        html! {
                            <li class={classes!("level", (*level == pairs).then_some("active"))}>
                                <label>
                                    <input type="radio" name="level" checked={*level == pairs} {onchange}/>
                                    <p>{i + 1}</p>
                                </label>
                            </li>
                        }
                    })
                }
            </ul>
            <label class="mode">
                <input type="checkbox" checked={easy} onchange={on_toggle_mode}/>
                <p>{"Легкий режим игры"}</p>
            </label>
            if easy {
                <p class="hint">{format!("Теперь у Вас есть {} попытки", GameMode::EASY_LIVES)}</p>
            }
            <button class="start" onclick={on_start}>{"Начать игру"}</button>
            <button class="link" onclick={on_leaderboard}>{"Посмотреть рейтинг лидеров"}</button>
        </div>
    }
}
