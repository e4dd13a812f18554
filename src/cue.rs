use std::io::Write;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Receiver;
use tracing::{debug, trace};

use crate::error::QuizError;
use crate::session::SessionEvent;

const BELL: &[u8] = b"\x07";
const DOUBLE_BELL_GAP: Duration = Duration::from_millis(150);

fn ring<W: Write>(sink: &mut W, times: usize) {
    for i in 0..times {
        if i > 0 {
            thread::sleep(DOUBLE_BELL_GAP);
        }
        // A failed cue is not worth surfacing.
        let _ = sink.write_all(BELL).and_then(|_| sink.flush());
    }
}

/// Observe session events and ring the terminal bell: once for a correct
/// answer, twice for a wrong one. Exits when every sender is dropped.
pub fn spawn_cue_player<W>(
    rx: Receiver<SessionEvent>,
    mut sink: W,
    muted: bool,
) -> Result<thread::JoinHandle<()>, QuizError>
where
    W: Write + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("tarkia-quiz::cue".to_string())
        .spawn(move || {
            for event in rx.iter() {
                trace!(?event, "cue event");
                if muted {
                    continue;
                }
                if let SessionEvent::AnswerConfirmed(outcome) = event {
                    ring(&mut sink, if outcome.correct { 1 } else { 2 });
                }
            }
            debug!("cue channel disconnected, exiting");
        })?;
    Ok(handle)
}
