//! Nested Sheets Example
//!
//! Two views share one stack:
//! - the root view presents a settings sheet
//! - the settings sheet presents a confirmation on top of itself
//! - dismissing the settings sheet unwinds both

use std::rc::Rc;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use sheet_stack::prelude::*;
use sheet_stack::wakeup;

#[derive(Debug, Clone, PartialEq)]
enum AppSheet {
    Settings,
    Confirm { action: &'static str },
}

impl Sheet for AppSheet {
    type Id = &'static str;

    fn id(&self) -> &'static str {
        match self {
            AppSheet::Settings => "settings",
            AppSheet::Confirm { action } => *action,
        }
    }
}

type View = Rc<SheetBinder<AppSheet, fn(&AppSheet) -> String>>;

fn content(sheet: &AppSheet) -> String {
    match sheet {
        AppSheet::Settings => "[ Settings ]".to_string(),
        AppSheet::Confirm { action } => format!("[ Really {action}? (y/n) ]"),
    }
}

fn frame(stack: &SheetStack<AppSheet>, views: &[&View]) {
    println!("-- depth {} --", stack.count());
    for view in views {
        match view.render() {
            Some(presentation) => println!(
                "  view@{} shows {:<10} {}",
                view.handle().index(),
                presentation.id,
                presentation.content
            ),
            None => println!("  view@{} shows nothing", view.handle().index()),
        }
    }
}

fn main() {
    let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), std::io::stderr());

    let stack: SheetStack<AppSheet> = SheetStack::with_config(StackConfig::new("demo"));
    let (tx, mut rx) = wakeup::channel();
    stack.install_wakeup(tx);

    let provider: fn(&AppSheet) -> String = content;
    let root = SheetBinder::attach(&stack, provider);
    frame(&stack, &[&root]);

    // The user opens settings from the root view.
    if let Err(err) = root.set_observed(Some(AppSheet::Settings)) {
        log::error!("{}", err);
    }

    // The settings sheet appears and binds itself one level up.
    let settings = SheetBinder::attach(&stack, provider);
    frame(&stack, &[&root, &settings]);

    // Settings asks for a confirmation.
    if let Err(err) = settings.set_observed(Some(AppSheet::Confirm { action: "sign out" })) {
        log::error!("{}", err);
    }
    frame(&stack, &[&root, &settings]);

    // A second request at the same depth is refused while one is shown.
    if let Err(err) = settings.set_observed(Some(AppSheet::Confirm { action: "reset" })) {
        log::warn!("{}", err);
    }

    // The user swipes the settings sheet away.
    root.dismiss();
    frame(&stack, &[&root, &settings]);

    println!(
        "{} wakeup(s) pending, {} sheet(s) left",
        rx.drain(),
        settings.stack().count()
    );
}
