use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use gallery_core::{update, AppState, Msg, TileView, ViewMode, Viewport};
use gallery_engine::{CatApiSource, EngineHandle, FileKvStore};
use gallery_logging::{gallery_info, gallery_warn};
use log::LevelFilter;

use crate::config::{self, GalleryConfig};
use crate::effects::{AppEventSink, EffectRunner};
use crate::input::{self, Command};
use crate::persistence;
use crate::render;
use crate::viewport::{SimulatedViewport, ViewportSignal, ViewportSubscription};

/// Everything the event loop reacts to, processed one at a time.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    Input(Command),
    /// A line that did not parse.
    Unknown(String),
    InputClosed,
}

pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let (config, config_err) = match config::load(config_path) {
        Ok(config) => (config, None),
        Err(err) => (GalleryConfig::default(), Some(err)),
    };
    gallery_logging::initialize(
        config.log_target.into(),
        LevelFilter::Info,
        &config.log_file,
    );
    if let Some(err) = config_err {
        gallery_warn!("Using default settings: {}", err);
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let source = Arc::new(CatApiSource::new(config.fetch_settings()));
    let engine = EngineHandle::new(source, Arc::new(AppEventSink::new(event_tx.clone())))
        .context("starting page worker")?;
    let store = FileKvStore::new(&config.data_dir);
    let runner = EffectRunner::new(engine, Box::new(store));

    spawn_input_reader(event_tx.clone());
    gallery_info!("Gallery started; data dir {:?}", config.data_dir);

    let mut gallery = Gallery::new(&config, runner, event_tx);
    println!("{}", input::HELP);
    gallery.start();
    gallery.run_until_quit(&event_rx);
    gallery_info!("Gallery stopped");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let event = match input::parse(&line) {
                Some(command) => AppEvent::Input(command),
                None => AppEvent::Unknown(line),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

struct Gallery {
    state: AppState,
    runner: EffectRunner,
    viewport: Rc<RefCell<SimulatedViewport>>,
    _scroll_subscription: ViewportSubscription<SimulatedViewport>,
    pending: VecDeque<Msg>,
    tiles: Vec<TileView>,
}

impl Gallery {
    fn new(config: &GalleryConfig, runner: EffectRunner, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let viewport = Rc::new(RefCell::new(SimulatedViewport::new(
            config.viewport_height,
            config.tile_height,
            config.columns,
        )));
        let scroll_subscription = ViewportSubscription::attach(
            &viewport,
            Box::new(move |current: Viewport| {
                let _ = event_tx.send(AppEvent::Core(Msg::Scrolled(current)));
            }),
        );

        Self {
            state: AppState::new(),
            runner,
            viewport,
            _scroll_subscription: scroll_subscription,
            pending: VecDeque::new(),
            tiles: Vec::new(),
        }
    }

    fn start(&mut self) {
        let favorites = persistence::load_favorites(self.runner.store());
        self.dispatch(Msg::FavoritesRestored(favorites));
        self.dispatch(Msg::Started);
    }

    fn run_until_quit(&mut self, events: &mpsc::Receiver<AppEvent>) {
        while let Ok(event) = events.recv() {
            match event {
                AppEvent::Core(msg) => self.dispatch(msg),
                AppEvent::Input(Command::Quit) | AppEvent::InputClosed => return,
                AppEvent::Input(command) => self.handle_command(command),
                AppEvent::Unknown(line) => {
                    if !line.trim().is_empty() {
                        println!("unknown command {:?}; {}", line.trim(), input::HELP);
                    }
                }
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Scroll(delta) => self.viewport.borrow_mut().scroll_by(delta),
            Command::ScrollToEnd => self.viewport.borrow_mut().scroll_to_end(),
            Command::Toggle(number) => {
                let tile = number.checked_sub(1).and_then(|index| self.tiles.get(index));
                match tile.map(|tile| tile.identifier.clone()) {
                    Some(identifier) => self.dispatch(Msg::FavoriteToggled(identifier)),
                    None => println!("no tile {number} in this view"),
                }
            }
            Command::ShowAll => self.dispatch(Msg::ViewSelected(ViewMode::All)),
            Command::ShowFavorites => self.dispatch(Msg::ViewSelected(ViewMode::Favorites)),
            Command::Show => self.draw(),
            Command::Help => println!("{}", input::HELP),
            Command::Quit => {}
        }
        // Scrolling changes what is on screen even when the state is clean.
        if matches!(command, Command::Scroll(_) | Command::ScrollToEnd) {
            self.draw();
        }
    }

    /// Applies `msg` and everything it leads to before returning.
    fn dispatch(&mut self, msg: Msg) {
        self.pending.push_back(msg);
        while let Some(msg) = self.pending.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let follow_ups = self.runner.run(effects);
            self.pending.extend(follow_ups);

            if state.consume_dirty() {
                self.tiles = state.view().tiles;
                self.state = state;
                self.viewport.borrow_mut().set_tile_count(self.tiles.len());
                self.draw();
                let measured = self.viewport.borrow().current();
                self.pending.push_back(Msg::LayoutMeasured(measured));
            } else {
                self.state = state;
            }
        }
    }

    fn draw(&self) {
        let view = self.state.view();
        let visible = self.viewport.borrow().visible_tiles();
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{}", render::render(&view, visible));
        let _ = stdout.flush();
    }
}
