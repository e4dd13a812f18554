use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use tarkia_quiz::ai::{OpenRouterQuestionSource, QuestionSource};
use tarkia_quiz::app::{Action, App};
use tarkia_quiz::card::measure::FontBook;
use tarkia_quiz::card::share::{
    CardRenderer, CommandShare, ExportOutcome, FileDownload, ResultExporter, ShareSurface,
};
use tarkia_quiz::config::{Cli, Settings};
use tarkia_quiz::error::QuizError;
use tarkia_quiz::generation_worker::spawn_generation_worker;
use tarkia_quiz::models::{GenerationRequest, GenerationResponse};
use tarkia_quiz::{cue, logger, ui};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK: Duration = Duration::from_millis(100);

struct Channels {
    requests: UnboundedSender<GenerationRequest>,
    responses: UnboundedReceiver<GenerationResponse>,
    outcomes_tx: UnboundedSender<ExportOutcome>,
    outcomes: UnboundedReceiver<ExportOutcome>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let _log_guard = logger::init(&cli.log_file, cli.verbose)?;
    let settings = cli.settings()?;

    info!(
        questions = settings.question_count,
        model = %settings.model.model,
        "starting tarkia-quiz"
    );

    let exporter = Arc::new(build_exporter(&settings));

    let (event_tx, event_rx) = crossbeam_channel::bounded(16);
    let cue_player = cue::spawn_cue_player(event_rx, io::stderr(), settings.muted)?;

    let (requests, request_rx) = mpsc::unbounded_channel();
    let (response_tx, responses) = mpsc::unbounded_channel();
    let source: Arc<dyn QuestionSource> =
        Arc::new(OpenRouterQuestionSource::new(settings.model.clone()));
    let worker = spawn_generation_worker(source, request_rx, response_tx);

    let (outcomes_tx, outcomes) = mpsc::unbounded_channel();
    let mut channels = Channels {
        requests,
        responses,
        outcomes_tx,
        outcomes,
    };

    let mut app = App::new(settings.quiz_config(settings.difficulty)).with_events(event_tx);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &mut channels, &exporter).await;
    restore_terminal(&mut terminal)?;

    // Closing the senders lets the worker and the cue thread exit.
    drop(app);
    drop(channels);
    if let Err(e) = worker.await {
        warn!(error = %e, "generation worker ended abnormally");
    }
    if cue_player.join().is_err() {
        warn!("cue player panicked");
    }

    if let Err(e) = &result {
        error!(error = %e, "exiting with error");
    }
    info!("bye");
    result
}

fn build_exporter(settings: &Settings) -> ResultExporter {
    let fonts = settings.fonts.clone().with_system_fallbacks();
    let renderer: Option<Arc<dyn CardRenderer>> = match FontBook::load(&fonts) {
        Ok(book) => Some(Arc::new(book) as Arc<dyn CardRenderer>),
        Err(e) => {
            warn!(error = %e, "result card export disabled");
            None
        }
    };

    let surface: Option<Arc<dyn ShareSurface>> = settings.share_command.as_ref().map(|program| {
        Arc::new(CommandShare::new(program, &settings.output_dir)) as Arc<dyn ShareSurface>
    });

    ResultExporter::new(renderer, surface, FileDownload::new(&settings.output_dir))
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    channels: &mut Channels,
    exporter: &Arc<ResultExporter>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => match app.handle_key(key) {
                    Action::Quit => break,
                    Action::Generate(config) => {
                        if channels
                            .requests
                            .send(GenerationRequest::Generate { config })
                            .is_err()
                        {
                            app.on_generation(GenerationResponse::Failed {
                                error: QuizError::Generation("generation worker stopped".into()),
                            });
                        }
                    }
                    Action::Export { card, ticket } => {
                        let exporter = Arc::clone(exporter);
                        let tx = channels.outcomes_tx.clone();
                        tokio::spawn(async move {
                            let outcome = exporter.export(card, ticket).await;
                            let _ = tx.send(outcome);
                        });
                    }
                    Action::None => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(response) = channels.responses.recv() => {
                app.on_generation(response);
            }
            Some(outcome) = channels.outcomes.recv() => {
                app.on_export(outcome);
            }
            _ = ticker.tick() => app.tick(),
        }
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Panics in spawned tasks are contained by the runtime; only the UI
        // thread takes the terminal down with it.
        if std::thread::current().name() == Some("main") {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
        default_hook(info);
    }));
}
