//! `school_finder browse`: a terminal front end for the listing.
//!
//! Page fetches run on a worker thread and report back over the same
//! channel as stdin, so `more` can be typed again while a page is loading.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use mime::Mime;
use thiserror::Error;

use crate::client::HttpSchoolApi;
use crate::domain::{NewSchool, School};
use crate::listing::{ApiError, FetchOutcome, ListController, PageRequest, SchoolApi};
use crate::media::DataUri;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    More,
    Search(String),
    Clear,
    Delete(i64),
    Reload,
    Add,
    List,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "more" | "m" => Ok(Command::More),
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "clear" => Ok(Command::Clear),
        "delete" | "d" => rest
            .parse()
            .map(Command::Delete)
            .map_err(|_| format!("Invalid ID: {rest:?}")),
        "reload" => Ok(Command::Reload),
        "add" => Ok(Command::Add),
        "list" | "ls" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "" => Err("Type `help` for commands".to_string()),
        other => Err(format!("Unknown command: {other}")),
    }
}

const HELP: &str = "\
more            load the next page
search <text>   filter by name, city or address
clear           clear the search
delete <id>     delete a school
reload          start again from page 1
add             add a school
list            show the current view
quit            leave";

/// What the caller should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Fetch(PageRequest),
    Add,
    Quit,
}

/// Listing state plus the API it talks to. Fetching is left to the
/// caller so it can happen off-thread.
pub struct Session<A> {
    api: A,
    controller: ListController,
}

impl<A: SchoolApi> Session<A> {
    pub fn new(api: A, page_size: u32) -> Self {
        Self {
            api,
            controller: ListController::new(page_size),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Step> {
        match command {
            Command::More => return self.more(out),
            Command::Search(query) => {
                self.controller.set_query(query);
                let state = self.controller.state();
                if !state.query().is_empty() {
                    writeln!(out, "Matching \"{}\":", state.query())?;
                }
                render_list(state.filtered(), out)?;
            }
            Command::Clear => {
                self.controller.set_query("");
                render_list(self.controller.state().filtered(), out)?;
            }
            Command::Delete(id) => match self.controller.delete(&self.api, id) {
                Ok(true) => writeln!(out, "Deleted school {id}.")?,
                Ok(false) => writeln!(out, "School {id} is not in the list.")?,
                Err(e) => writeln!(out, "Could not delete school {id}: {e}")?,
            },
            Command::Reload => {
                self.controller.reload();
                writeln!(out, "List cleared.")?;
                return self.more(out);
            }
            Command::Add => return Ok(Step::Add),
            Command::List => {
                render_list(self.controller.state().filtered(), out)?;
                let cursor = self.controller.cursor();
                if cursor.has_more() {
                    writeln!(out, "`more` loads page {}.", cursor.page())?;
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Step::Quit),
        }
        Ok(Step::Continue)
    }

    fn more<W: Write>(&mut self, out: &mut W) -> io::Result<Step> {
        if let Some(request) = self.controller.need_more() {
            writeln!(out, "Loading page {}…", request.page())?;
            return Ok(Step::Fetch(request));
        }
        if self.controller.is_fetching() {
            writeln!(out, "Still loading…")?;
        } else {
            writeln!(out, "You've reached the end.")?;
        }
        Ok(Step::Continue)
    }

    /// Load the next page on this thread, before any input is read.
    pub fn load_now<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.controller.load_more(&self.api) {
            Ok(Some(_)) => render_list(self.controller.state().filtered(), out),
            Ok(None) => Ok(()),
            Err(e) => writeln!(out, "Could not load schools: {e}"),
        }
    }

    pub fn fetched<W: Write>(
        &mut self,
        request: PageRequest,
        result: Result<Vec<School>, ApiError>,
        out: &mut W,
    ) -> io::Result<()> {
        match self.controller.finish_fetch(request, result) {
            Ok(FetchOutcome::Merged { added, has_more }) => {
                writeln!(out, "Page {}: {added} new.", request.page())?;
                render_list(self.controller.state().filtered(), out)?;
                if !has_more {
                    writeln!(out, "You've reached the end.")?;
                }
            }
            Ok(FetchOutcome::Stale { .. }) => {}
            Err(e) => writeln!(out, "Could not load page {}: {e}", request.page())?,
        }
        Ok(())
    }

    pub fn add<W: Write>(&mut self, school: &NewSchool, out: &mut W) -> io::Result<()> {
        match self.api.create_school(school) {
            Ok(()) => writeln!(out, "School added successfully. `reload` to see it.")?,
            Err(ApiError::Validation(msg)) => writeln!(out, "Not added: {msg}")?,
            Err(e) => writeln!(out, "Error adding school: {e}")?,
        }
        Ok(())
    }
}

pub fn render_list<W: Write>(schools: &[School], out: &mut W) -> io::Result<()> {
    if schools.is_empty() {
        return writeln!(out, "No schools found.");
    }
    for s in schools {
        writeln!(out, "{:>5}  {} · {} · {}", s.id, s.name, s.city, s.address)?;
    }
    Ok(())
}

/// Image file as a `data:` URI, typed from its extension.
pub fn image_data_uri(path: &Path) -> Result<String, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let mime: Mime = match ext.as_str() {
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp"
            .parse()
            .map_err(|e| format!("unsupported image type: {e}"))?,
        other => return Err(format!("File must be an image (got .{other})")),
    };

    let bytes = fs::read(path).map_err(|e| format!("Image could not be read: {e}"))?;
    Ok(DataUri::encode(&mime, &bytes))
}

enum Event {
    Line(String),
    Fetched(PageRequest, Result<Vec<School>, ApiError>),
    InputClosed,
}

pub fn run(server_url: &str, page_size: u32) -> Result<(), BrowseError> {
    let api = HttpSchoolApi::new(server_url)?;
    let mut session = Session::new(api, page_size);
    let (tx, rx) = mpsc::channel();

    spawn_stdin_reader(tx.clone());

    let mut out = io::stdout();
    writeln!(out, "School Finder · {server_url}\n{HELP}")?;
    session.load_now(&mut out)?;

    loop {
        out.flush()?;
        let Some(line) = next_line(&rx, &mut session, &mut out)? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };

        match session.execute(command, &mut out)? {
            Step::Continue => {}
            Step::Fetch(request) => spawn_fetch(session.api().clone(), request, tx.clone()),
            Step::Add => {
                if let Some(school) = prompt_new_school(&rx, &mut session, &mut out)? {
                    session.add(&school, &mut out)?;
                }
            }
            Step::Quit => break,
        }
    }

    tracing::debug!(
        loaded = session.controller().state().master().len(),
        "browse session ended"
    );
    Ok(())
}

fn spawn_stdin_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

fn spawn_fetch(api: HttpSchoolApi, request: PageRequest, tx: Sender<Event>) {
    thread::spawn(move || {
        let result = api.fetch_page(request.page(), request.page_size());
        let _ = tx.send(Event::Fetched(request, result));
    });
}

/// Wait for the next input line, folding in any pages that land meanwhile.
/// `None` once stdin is closed.
fn next_line<W: Write>(
    rx: &Receiver<Event>,
    session: &mut Session<HttpSchoolApi>,
    out: &mut W,
) -> Result<Option<String>, BrowseError> {
    loop {
        match rx.recv() {
            Ok(Event::Line(line)) => return Ok(Some(line)),
            Ok(Event::Fetched(request, result)) => {
                session.fetched(request, result, out)?;
                out.flush()?;
            }
            Ok(Event::InputClosed) | Err(_) => return Ok(None),
        }
    }
}

fn prompt_new_school<W: Write>(
    rx: &Receiver<Event>,
    session: &mut Session<HttpSchoolApi>,
    out: &mut W,
) -> Result<Option<NewSchool>, BrowseError> {
    let mut ask = |label: &str, out: &mut W| -> Result<Option<String>, BrowseError> {
        write!(out, "{label}: ")?;
        out.flush()?;
        next_line(rx, session, out)
    };

    let mut fields = Vec::with_capacity(6);
    for label in ["School name", "Address", "City", "State", "Contact", "Email"] {
        match ask(label, out)? {
            Some(value) => fields.push(value),
            None => return Ok(None),
        }
    }
    let Some(image_path) = ask("Image file", out)? else {
        return Ok(None);
    };

    let image_base64 = match image_data_uri(Path::new(image_path.trim())) {
        Ok(uri) => uri,
        Err(msg) => {
            writeln!(out, "{msg}")?;
            return Ok(None);
        }
    };

    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    Ok(Some(NewSchool {
        name: next(),
        address: next(),
        city: next(),
        state: next(),
        contact: next(),
        email_id: next(),
        image_base64,
    }))
}
