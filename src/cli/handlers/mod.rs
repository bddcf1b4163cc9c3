use regex::RegexBuilder;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::cli::settings::Settings;
use crate::io::config_io;
use crate::io::repository::{DocumentProvider, LocalRepository};
use crate::io::scratchpad::{ScratchpadError, scratchpad_file_name};
use crate::model::date::parse_iso_date;
use crate::model::keys::{SectionKey, TagKey};
use crate::ops::annual_index::AnnualIndex;
use crate::ops::events::recent_and_upcoming;
use crate::ops::search;
use crate::ops::selection::SelectionState;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, settings: &Settings) -> CmdResult {
    match command {
        Commands::Sections => cmd_sections(settings),
        Commands::Tags(args) => cmd_tags(args, settings),
        Commands::Dates(args) => cmd_dates(args, settings),
        Commands::Show(args) => cmd_show(args, settings),
        Commands::Search(args) => cmd_search(args, settings),
        Commands::Events => cmd_events(settings),
        Commands::Scratchpads => cmd_scratchpads(settings),
        Commands::Scratchpad(args) => cmd_scratchpad(args, settings),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_index(settings: &Settings) -> Result<AnnualIndex, Box<dyn std::error::Error>> {
    let repo: LocalRepository = settings.repository()?;
    let index = AnnualIndex::rebuild_year(settings.year, &repo, settings.skip_first_line())?;
    Ok(index)
}

/// Section named on the command line; must exist in the index
fn resolve_section(index: &AnnualIndex, title: &str) -> Result<SectionKey, String> {
    let key = SectionKey::from_label(title);
    if index.contains_section(&key) {
        Ok(key)
    } else {
        Err(format!("no section \"{}\" in {}", title.trim(), index.year()))
    }
}

/// Tag named on the command line; must exist under `scope`
fn resolve_tag(index: &AnnualIndex, scope: &SectionKey, title: &str) -> Result<TagKey, String> {
    let key = TagKey::from_label(title);
    if index.contains_tag(scope, &key) {
        Ok(key)
    } else if scope.is_real() {
        Err(format!(
            "no tag \"{}\" under section \"{}\" in {}",
            title.trim(),
            scope,
            index.year()
        ))
    } else {
        Err(format!("no tag \"{}\" in {}", title.trim(), index.year()))
    }
}

/// Menu rows without the leading select-none entry
fn print_menu(texts: &[String]) {
    for text in texts.iter().skip(1) {
        println!("{}", text);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_sections(settings: &Settings) -> CmdResult {
    let index = load_index(settings)?;
    if settings.json {
        let sections: Vec<_> = index
            .sections()
            .map(|(section, days)| section_to_json(section, days))
            .collect();
        println!("{}", serde_json::to_string_pretty(&sections)?);
    } else {
        let selection = SelectionState::new(&index);
        print_menu(selection.section_menu().texts());
    }
    Ok(())
}

fn cmd_tags(args: TagsArgs, settings: &Settings) -> CmdResult {
    let index = load_index(settings)?;
    let section = args
        .section
        .as_deref()
        .map(|s| resolve_section(&index, s))
        .transpose()?;

    let mut selection = SelectionState::new(&index);
    selection.on_section_changed(&index, section.clone());

    if settings.json {
        let scope = section.unwrap_or(SectionKey::Any);
        let tags: Vec<_> = index
            .tags_for(&scope)
            .map(|(tag, days)| tag_to_json(tag, days))
            .collect();
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        print_menu(selection.tag_menu().texts());
    }
    Ok(())
}

fn cmd_dates(args: DatesArgs, settings: &Settings) -> CmdResult {
    let index = load_index(settings)?;
    let section = args
        .section
        .as_deref()
        .map(|s| resolve_section(&index, s))
        .transpose()?;
    let scope = section.clone().unwrap_or(SectionKey::Any);
    let tag = args
        .tag
        .as_deref()
        .map(|t| resolve_tag(&index, &scope, t))
        .transpose()?;

    let mut selection = SelectionState::new(&index);
    selection.on_section_changed(&index, section.clone());
    selection.on_tag_changed(tag.clone());

    // no filter lists every day with an entry
    let days = selection
        .highlighted_dates(&index)
        .unwrap_or(index.dates_with_document());
    let dates: Vec<String> = days
        .iter()
        .filter_map(|day| day.in_year(index.year()))
        .map(|date| date.to_string())
        .collect();

    if settings.json {
        let out = DatesJson {
            year: index.year(),
            section: section.map(|s| s.label().to_string()),
            tag: tag.map(|t| t.label().to_string()),
            dates,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for date in dates {
            println!("{}", date);
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, settings: &Settings) -> CmdResult {
    let date = parse_iso_date(&args.date)
        .ok_or_else(|| format!("invalid date \"{}\" (expected YYYY-MM-DD)", args.date))?;
    let repo = settings.repository()?;
    let text = repo
        .read(date)?
        .ok_or_else(|| format!("no entry for {}", date))?;

    if settings.json {
        let out = EntryJson {
            date: date.to_string(),
            text,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, settings: &Settings) -> CmdResult {
    let re = RegexBuilder::new(&args.pattern)
        .case_insensitive(args.ignore_case)
        .build()?;
    let repo = settings.repository()?;
    let hits = search::search_year(&repo, settings.year, &re)?;

    if settings.json {
        let out: Vec<_> = hits.iter().map(hit_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for hit in &hits {
            println!("{}", format_hit(hit));
        }
    }
    Ok(())
}

fn cmd_events(settings: &Settings) -> CmdResult {
    let events = config_io::calendar_events(&settings.config)?;
    let nearby = recent_and_upcoming(
        &events,
        settings.today,
        settings.config.recent_events_window,
    );

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&events_to_json(&nearby))?);
    } else {
        for (group, items) in &nearby.groups {
            println!("{}", group);
            for item in items {
                println!("{}", item.list_text());
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scratchpads
// ---------------------------------------------------------------------------

fn cmd_scratchpads(settings: &Settings) -> CmdResult {
    let pads = settings.scratchpads().list()?;
    if settings.json {
        let out: Vec<_> = pads.iter().map(scratchpad_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for pad in &pads {
            println!("{}", format_scratchpad(pad));
        }
    }
    Ok(())
}

fn cmd_scratchpad(args: ScratchpadArgs, settings: &Settings) -> CmdResult {
    let name = scratchpad_file_name(&args.name)?;
    let text = settings
        .scratchpads()
        .read(&name)?
        .ok_or_else(|| ScratchpadError::NotFound(name.clone()))?;

    if settings.json {
        let out = ScratchpadTextJson { name, text };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
