use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

pub const INTRO_MESSAGES: [&str; 3] = [
    "渋谷　の　おいしいお店　を　探す冒険　に　出よう！",
    "ピン　を　タップ　すると　お店の情報　が　見られるよ",
    "からい　あぶら　あまい　で　お店の絞り込み　が　できるよ",
];

const TYPE_INTERVAL_MS: u32 = 100;
const NEXT_MESSAGE_DELAY_MS: u32 = 1000;
const CLOSE_DELAY_MS: u32 = 3000;

/// First `count` characters of `message`.
fn typed_prefix(message: &str, count: usize) -> String {
    message.chars().take(count).collect()
}

/// Typewriter-style greeting shown over the map on first load.
/// Clicking skips straight to the map.
#[component]
pub fn IntroDialog(on_complete: EventHandler<()>) -> Element {
    let mut displayed = use_signal(String::new);
    let mut finished_line = use_signal(|| false);

    use_future(move || async move {
        for (index, message) in INTRO_MESSAGES.iter().enumerate() {
            finished_line.set(false);
            let len = message.chars().count();
            for count in 1..=len {
                displayed.set(typed_prefix(message, count));
                TimeoutFuture::new(TYPE_INTERVAL_MS).await;
            }
            finished_line.set(true);
            let last = index + 1 == INTRO_MESSAGES.len();
            TimeoutFuture::new(if last { CLOSE_DELAY_MS } else { NEXT_MESSAGE_DELAY_MS }).await;
        }
        on_complete.call(());
    });

    rsx! {
        div {
            class: "intro-backdrop",
            onclick: move |_| on_complete.call(()),
            div { class: "retro-modal intro-dialog",
                div { class: "retro-modal-text",
                    "{displayed}"
                    if *finished_line.read() {
                        span { class: "blink", " ◀" }
                    }
                }
            }
        }
    }
}
