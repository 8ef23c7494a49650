use crate::app::Page;
use crate::end_game::EndGameModal;
use crate::utils::*;
use chrono::{DateTime, Utc};
use gloo::timers::callback::{Interval, Timeout};
use pairmatch_core as game;
use yew::prelude::*;

/// How often the clock on screen is refreshed.
const CLOCK_SAMPLE_MS: u32 = 300;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCardState {
    FaceDown,
    FaceUp,
    Guessed,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: game::Card,
    state: ViewCardState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use ViewCardState::*;

    let CardProps {
        card,
        state,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match state {
            FaceDown => classes!("closed"),
            FaceUp => classes!("open", card.suit().name()),
            Guessed => classes!("open", "guessed", card.suit().name()),
        }
    );
    if card.disabled {
        class.push("disabled");
    }
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", card.id);
        callback.emit(card.id);
    });

    html! {
        <button {class} {onclick} disabled={card.disabled}>
            if !matches!(state, FaceDown) {
                <span class="rank">{card.rank().label()}</span>
                <span class="suit">{card.suit().symbol()}</span>
            }
        </button>
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    OpenCard(game::CardId),
    UpdateTime,
    Deadline,
    Reveal,
    RandomMatch,
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: game::GameConfig,
    #[prop_or_default]
    pub seed: Option<u64>,
    pub navigate: Callback<Page>,
}

pub(crate) struct GameView {
    session: game::GameSession,
    prev_time: game::Elapsed,
    deadline: Option<DateTime<Utc>>,
    deferred_timeout: Option<Timeout>,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(CLOCK_SAMPLE_MS, move || link.send_message(Msg::UpdateTime))
    }

    /// Keeps exactly one timeout armed for the session's next deferred action.
    ///
    /// Replacing or dropping the old `Timeout` cancels it.
    fn sync_deadline(&mut self, ctx: &Context<Self>) {
        let next = self.session.next_deadline();
        if next == self.deadline {
            return;
        }

        self.deadline = next;
        self.deferred_timeout = next.map(|due| {
            let delay = millis_until(due, utc_now());
            log::trace!("deferred action in {}ms", delay);
            let link = ctx.link().clone();
            Timeout::new(delay, move || link.send_message(Msg::Deadline))
        });
    }

    fn card_state(&self, card: &game::Card) -> ViewCardState {
        if card.guessed {
            ViewCardState::Guessed
        } else if self.session.shows_face(card) {
            ViewCardState::FaceUp
        } else {
            ViewCardState::FaceDown
        }
    }

    fn view_header(&self, ctx: &Context<Self>) -> Html {
        let status = self.session.status();
        let config = self.session.config();
        let in_progress = status.is_in_progress();

        let clock = if matches!(status, game::GameStatus::Preview) {
            html! {
                <div class="preview">
                    <p>{"Запоминайте пары!"}</p>
                    <p>{format!("Игра начнется через {} секунд", config.preview_secs)}</p>
                </div>
            }
        } else {
            let game::Elapsed { minutes, seconds } = self.prev_time;
            html! {
                <div class={classes!("clock", self.session.is_timer_frozen().then_some("frozen"))}>
                    <div><small>{"min"}</small><span>{format!("{:02}", minutes)}</span></div>
                    {"."}
                    <div><small>{"sec"}</small><span>{format!("{:02}", seconds)}</span></div>
                </div>
            }
        };

        html! {
            <nav>
                {clock}
                <button
                    class="powerup random-match"
                    title="Алохомора: Открывается случайная пара карт."
                    disabled={!in_progress || self.session.random_match_used()}
                    onclick={ctx.link().callback(|_| Msg::RandomMatch)}
                />
                <button
                    class="powerup reveal"
                    title="Прозрение: Откроет все неоткрытые карты"
                    disabled={!in_progress || self.session.reveal_used()}
                    onclick={ctx.link().callback(|_| Msg::Reveal)}
                />
                if in_progress {
                    <button class="restart" onclick={ctx.link().callback(|_| Msg::NewGame)}>
                        {"Начать заново"}
                    </button>
                }
            </nav>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        let mut view = Self {
            session: game::GameSession::new(props.config, seed, utc_now()),
            prev_time: game::Elapsed::ZERO,
            deadline: None,
            deferred_timeout: None,
            _timer_interval: GameView::create_timer(ctx),
        };
        view.sync_deadline(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let now = utc_now();
        let updated = match msg {
            OpenCard(id) => match self.session.open_card(id, now) {
                Ok(outcome) => {
                    log::debug!("open card {}: {:?}", id, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    log::warn!("open card {}: {}", id, err);
                    false
                }
            },
            UpdateTime => {
                let time = self.session.elapsed(now);
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            Deadline => {
                // re-arm even when nothing was due yet
                self.deadline = None;
                self.deferred_timeout = None;
                self.session.advance(now).has_update()
            }
            Reveal => {
                let outcome = self.session.use_reveal(now);
                log::debug!("reveal: {:?}", outcome);
                outcome.has_update()
            }
            RandomMatch => {
                let outcome = self.session.use_random_match(now);
                log::debug!("random match: {:?}", outcome);
                outcome.has_update()
            }
            NewGame => {
                self.session.reset(js_random_seed(), now);
                true
            }
        };

        self.prev_time = self.session.elapsed(now);
        self.sync_deadline(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = self.session.status();
        let playable = status.is_in_progress();
        let callback = ctx.link().callback(Msg::OpenCard);

        let on_back = ctx.props().navigate.reform(|_: MouseEvent| Page::SelectLevel);

        html! {
            <div class="pairmatch">
                {self.view_header(ctx)}
                <div class={classes!("cards", playable.then_some("playable"))}>
                    {
                        for self.session.cards().iter().map(|card| {
                            let state = self.card_state(card);
                            let locked = !playable || card.open;
                            html! {
                                <CardView key={card.id} card={*card} {state} {locked} callback={callback.clone()}/>
                            }
                        })
                    }
                </div>
                if let Some(lives) = self.session.lives() {
                    <p class="lives">{format!("Осталось {} попытки", lives)}</p>
                }
                <p class="lives">{format!("Отгаданно правильно пар: {}", self.session.correct_pairs_count())}</p>
                <button class="link" onclick={on_back}>{"НАЗАД"}</button>
                if status.is_finished() {
                    <EndGameModal
                        summary={self.session.summary(utc_now())}
                        on_restart={ctx.link().callback(|()| Msg::NewGame)}
                        navigate={ctx.props().navigate.clone()}
                    />
                }
            </div>
        }
    }
}
