// Terminal renderer
use crate::domain::aspect::Lamp;
use crate::domain::frame::SignalFrame;
use crate::domain::selection::DisplayMode;
use tokio::sync::watch;

const LIT: char = '●';
const UNLIT: char = '○';

/// One line per frame, e.g. `signal [○ ● ○ ● ○] orange+orange  evm [ 60]`.
pub fn render(frame: &SignalFrame, mode: DisplayMode) -> String {
    let mut parts = Vec::with_capacity(2);

    if mode.shows_lamps() {
        let lamps: Vec<String> = Lamp::ALL
            .iter()
            .map(|lamp| {
                let glyph = if frame.aspect.is_lit(*lamp) { LIT } else { UNLIT };
                glyph.to_string()
            })
            .collect();
        let colours = if frame.aspect.is_dark() {
            "dark".to_string()
        } else {
            frame.aspect.lamps().map(Lamp::colour).collect::<Vec<_>>().join("+")
        };
        parts.push(format!("signal [{}] {}", lamps.join(" "), colours));
    }

    if mode.shows_readout() {
        parts.push(format!("evm [{}]", frame.readout));
    }

    parts.join("  ")
}

/// Print a line whenever the board shows a new picture. Ends when the board is dropped.
pub async fn run_console(mut frames: watch::Receiver<SignalFrame>, mode: DisplayMode) {
    while frames.changed().await.is_ok() {
        let line = render(&frames.borrow_and_update(), mode);
        println!("{}", line);
    }
}
