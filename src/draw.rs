use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::content::{self, render_blocks};
use crate::state::copy;
use crate::state::form::{AccountPath, FieldName};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::signup::{FocusField, SubmitPhase, whatsapp_share_link};
use crate::ui::layout::LayoutAreas;
use liga_api::MatchStatus;

static TABS: &[&str; 6] = &["League", "Signup", "Standings", "Schedule", "Guide", "Cities"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        let mut main = layout.main;
        if app.state.show_logs && main.height > 12 {
            let [content, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(8)]).areas(main);
            main = content;
            draw_logs(f, logs);
        }

        match app.state.active_tab {
            MenuItem::League => draw_league(f, main, app),
            MenuItem::Signup => draw_signup(f, main, app),
            MenuItem::Standings => draw_standings(f, main, app),
            MenuItem::Schedule => draw_schedule(f, main, app),
            MenuItem::Guide => draw_guide(f, main, app),
            MenuItem::Cities => draw_cities(f, main, app),
            MenuItem::Help => draw_placeholder(
                f,
                main,
                "Help: q=quit  1-6=tabs  j/k=move  e/Enter=edit  a=account path  l=level  \
                 s=submit  d=discount  r=round  /=search  L=language  ?=help",
            ),
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::League => 0,
        MenuItem::Signup => 1,
        MenuItem::Standings => 2,
        MenuItem::Schedule => 3,
        MenuItem::Guide => 4,
        MenuItem::Cities => 5,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let lang = Paragraph::new(format!("{} | ? ", app.state.locale.code()))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(lang, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// League tab
// ---------------------------------------------------------------------------

fn draw_league(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" League ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [lookup, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let lookup_line = if app.state.league.editing {
        format!("slug: {}_", app.state.league.slug_input)
    } else if app.state.league.slug_input.is_empty() {
        "Press / to enter a league slug, Enter to load".to_string()
    } else {
        format!("slug: {}  (/=edit  Enter=reload)", app.state.league.slug_input)
    };
    let lookup_style = if app.state.league.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(Paragraph::new(lookup_line).style(lookup_style), lookup);

    if let Some(slug) = app.state.league.not_found.as_deref() {
        let msg = format!("{}\n\n  {slug}", copy::league_not_found(app.state.locale));
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let Some(league) = app.state.league.league.as_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Load failed:\n{err}")
        } else {
            "No league loaded yet".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    };

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        league.name.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(format!("City:    {} ({})", league.city, league.region)));
    lines.push(Line::from(format!("Status:  {}", league.status.label())));
    lines.push(Line::from(format!("Level:   {}", league.skill_level.as_str())));
    lines.push(Line::from(format!(
        "Season:  {}",
        liga_api::season_display_name(&league.resolved_season_name())
    )));
    if let Some(price) = league
        .season_config
        .as_ref()
        .and_then(|c| c.price.as_ref())
        .or_else(|| league.seasons.first().and_then(|s| s.price.as_ref()))
    {
        lines.push(Line::from(format!("Price:   {}", price.display())));
    }
    if let Some(date) = league.expected_start_date() {
        lines.push(Line::from(format!("Starts:  {}", date.format("%d/%m/%Y"))));
    }
    let description = league.description.get(app.state.locale);
    if !description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(description.to_owned()));
    }
    if !league.status.accepts_registrations() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Registrations are closed for this league",
            Style::default().fg(Color::Red),
        )));
    }

    f.render_widget(Paragraph::new(lines), content);
}

// ---------------------------------------------------------------------------
// Signup tab
// ---------------------------------------------------------------------------

fn draw_signup(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Signup ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.signup.phase == SubmitPhase::Success {
        draw_signup_success(f, inner, app);
        return;
    }

    let locale = app.state.locale;
    let signup = &app.state.signup;
    let level_choice = app
        .state
        .league
        .league
        .as_ref()
        .map(|l| l.requires_level_choice())
        .unwrap_or(true);

    let mut lines: Vec<Line> = Vec::new();

    match app.state.league.league.as_ref() {
        Some(league) => lines.push(Line::from(format!("Registering for: {}", league.name))),
        None => lines.push(Line::from(Span::styled(
            "No league loaded: this creates a player account only",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let (new_style, existing_style) = match signup.form.path {
        AccountPath::New => (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::DarkGray),
        ),
        AccountPath::Existing => (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };
    lines.push(Line::from(vec![
        Span::styled("[ New account ]", new_style),
        Span::raw("  "),
        Span::styled("[ I already have an account ]", existing_style),
        Span::styled("   (a to switch)", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));

    if signup.form.path == AccountPath::New {
        push_field(&mut lines, "Name", &signup.form.name, FocusField::Name, signup, false);
        push_error(&mut lines, signup.errors.get(FieldName::Name));
    }
    push_field(&mut lines, "Email", &signup.form.email, FocusField::Email, signup, false);
    push_error(&mut lines, signup.errors.get(FieldName::Email));
    if signup.form.path == AccountPath::New {
        push_field(&mut lines, "WhatsApp", &signup.form.whatsapp, FocusField::Whatsapp, signup, false);
        push_error(&mut lines, signup.errors.get(FieldName::Whatsapp));
    }
    if level_choice {
        let level = signup
            .form
            .level
            .map(|l| l.as_str())
            .unwrap_or("(press e to choose)");
        push_field(&mut lines, "Level", level, FocusField::Level, signup, false);
        push_error(&mut lines, signup.errors.get(FieldName::Level));
    }
    push_field(&mut lines, "Password", &signup.form.password, FocusField::Password, signup, true);
    push_error(&mut lines, signup.errors.get(FieldName::Password));

    lines.push(Line::from(""));
    draw_discount_lines(&mut lines, app);
    lines.push(Line::from(""));

    let submit_label = if signup.is_submitting() {
        "Submitting..."
    } else {
        "s = submit"
    };
    lines.push(Line::from(Span::styled(
        submit_label,
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    if let Some(err) = signup.errors.get(FieldName::Submit) {
        lines.push(Line::from(Span::styled(
            err.to_owned(),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(info) = signup.errors.get(FieldName::Info) {
        lines.push(Line::from(Span::styled(
            info.to_owned(),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(Span::styled(
            copy::dashboard_hint(locale).to_owned(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn push_field(
    lines: &mut Vec<Line>,
    label: &str,
    value: &str,
    field: FocusField,
    signup: &crate::state::signup::SignupState,
    masked: bool,
) {
    let focused = signup.focus == field;
    let marker = if focused { '>' } else { ' ' };
    let shown: String = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_owned()
    };
    let cursor = if focused && signup.editing { "_" } else { "" };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    lines.push(Line::from(Span::styled(
        format!("{marker} {label:<9} {shown}{cursor}"),
        style,
    )));
}

fn push_error(lines: &mut Vec<Line>, error: Option<&str>) {
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("    {error}"),
            Style::default().fg(Color::Red),
        )));
    }
}

fn draw_discount_lines(lines: &mut Vec<Line>, app: &App) {
    let signup = &app.state.signup;
    let discount = &app.state.discount;
    let focused = signup.focus == FocusField::Discount;
    let marker = if focused { '>' } else { ' ' };
    let cursor = if focused && signup.editing { "_" } else { "" };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    lines.push(Line::from(Span::styled(
        format!("{marker} Discount  {}{cursor}  (d to apply)", discount.code_input),
        style,
    )));

    if discount.validating {
        lines.push(Line::from(Span::styled(
            "    checking code...",
            Style::default().fg(Color::DarkGray),
        )));
        return;
    }
    let Some(validation) = discount.validation.as_ref() else {
        return;
    };
    if validation.valid {
        let mut parts = Vec::new();
        if let (Some(original), Some(final_price)) =
            (validation.original_price, validation.final_price)
        {
            parts.push(format!("{original:.2} -> {final_price:.2}"));
        }
        if let Some(pct) = validation.discount_percentage {
            parts.push(format!("-{pct:.0}%"));
        }
        if let Some(desc) = validation.description.as_deref() {
            parts.push(desc.to_owned());
        }
        lines.push(Line::from(Span::styled(
            format!("    applied: {}", parts.join("  ")),
            Style::default().fg(Color::Green),
        )));
    } else {
        let reason = validation.error.as_deref().unwrap_or("invalid code");
        lines.push(Line::from(Span::styled(
            format!("    {reason}"),
            Style::default().fg(Color::Red),
        )));
    }
}

/// Post-registration screen. Everything on it is optional except the
/// confirmation and the dashboard hint; the player leaves on their own.
fn draw_signup_success(f: &mut Frame, area: Rect, app: &App) {
    let locale = app.state.locale;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        copy::registration_confirmed(locale).to_owned(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    if let Some(result) = app.state.signup.result.as_ref() {
        lines.push(Line::from(format!("{} — {}", result.player_name, result.league_name)));
        if let Some(date) = result.expected_start_date {
            lines.push(Line::from(format!("Season starts {}", date.format("%d/%m/%Y"))));
        }
        lines.push(Line::from(""));
        if let Some(link) = result.whatsapp_group_link.as_deref() {
            lines.push(Line::from(vec![
                Span::styled("WhatsApp group: ", Style::default().fg(Color::Gray)),
                Span::styled(link.to_owned(), Style::default().fg(Color::Cyan)),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("Share: ", Style::default().fg(Color::Gray)),
            Span::styled(result.share_url.clone(), Style::default().fg(Color::Cyan)),
        ]));
        lines.push(Line::from(Span::styled(
            whatsapp_share_link(locale, &result.share_url),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(copy::dashboard_hint(locale).to_owned()));

    f.render_widget(Paragraph::new(lines), area);
}

// ---------------------------------------------------------------------------
// Standings tab
// ---------------------------------------------------------------------------

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Standings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(table) = app.state.standings.table.as_ref() else {
        f.render_widget(
            Paragraph::new("No standings loaded. Load a league first.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(format!(
        "{}  |  Round {}/{}  |  {} players",
        app.state.standings.season_label(),
        table.current_round,
        table.total_rounds,
        table.total_players
    )));
    lines.push(Line::from(Span::styled(
        format!("{:>3} {:<10} {:<20} {:>6} {:>4} {:>4} {:>5} {:>5}", "#", "Zone", "Player", "ELO", "MP", "W", "Win%", "Pts"),
        Style::default().fg(Color::DarkGray),
    )));

    if table.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No standings for this season yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let visible = inner.height.saturating_sub(2) as usize;
    let selected = app.state.standings.selected;
    let start = selected.saturating_sub(visible.saturating_sub(1));
    for (idx, row) in table.rows.iter().enumerate().skip(start).take(visible.max(1)) {
        let zone = row.zone();
        let zone_color = match zone {
            liga_api::PlayoffZone::PlayoffA => Color::Green,
            liga_api::PlayoffZone::PlayoffB => Color::Cyan,
            liga_api::PlayoffZone::League => Color::Gray,
        };
        let marker = if idx == selected { '>' } else { ' ' };
        let text = format!(
            "{marker}{:>2} {:<10} {:<20} {:>6.0} {:>4} {:>4} {:>4}% {:>5}",
            row.position,
            zone.label(),
            truncate(&row.player_name, 20),
            row.elo,
            row.matches_played,
            row.matches_won,
            row.win_percent(),
            row.points,
        );
        let style = if idx == selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(zone_color)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn truncate(name: &str, max: usize) -> String {
    let mut s: String = name.chars().take(max).collect();
    while s.chars().count() < max {
        s.push(' ');
    }
    s
}

// ---------------------------------------------------------------------------
// Schedule tab
// ---------------------------------------------------------------------------

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Schedule ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let schedule = &app.state.schedule;
    if schedule.matches.is_empty() {
        f.render_widget(
            Paragraph::new("No matches loaded. Load a league first.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    let mut round_spans: Vec<Span> = vec![Span::styled(
        "Rounds (r to cycle): ",
        Style::default().fg(Color::Gray),
    )];
    let all_style = if schedule.selected_round.is_none() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    round_spans.push(Span::styled("all ", all_style));
    for (round, available) in schedule.rounds() {
        let style = if schedule.selected_round == Some(round) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if available {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        round_spans.push(Span::styled(format!("{round} "), style));
    }
    lines.push(Line::from(round_spans));
    lines.push(Line::from(""));

    let visible = schedule.visible_matches();
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "No matches in this round",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let offset = schedule.scroll_offset as usize;
    let mut last_round = None;
    for m in visible.iter().skip(offset) {
        if last_round != Some(m.round) {
            lines.push(Line::from(Span::styled(
                format!("Round {}", m.round),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            )));
            last_round = Some(m.round);
        }
        let status = match m.status {
            MatchStatus::Completed => m.score.clone().unwrap_or_else(|| "played".to_owned()),
            MatchStatus::Postponed => "postponed".to_owned(),
            MatchStatus::Scheduled => m
                .scheduled_at
                .map(|t| t.format("%d/%m %H:%M").to_string())
                .unwrap_or_else(|| "pending".to_owned()),
        };
        let status_color = match m.status {
            MatchStatus::Completed => Color::Green,
            MatchStatus::Postponed => Color::Red,
            MatchStatus::Scheduled => Color::DarkGray,
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} vs {}  ", m.home, m.away)),
            Span::styled(format!("[{status}]"), Style::default().fg(status_color)),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Guide tab
// ---------------------------------------------------------------------------

fn draw_guide(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Guide ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let locale = app.state.locale;
    let mut blocks = content::swiss_pairing_guide(locale);
    blocks.extend(content::elo_rating_guide(locale));

    let text = render_blocks(&blocks).join("\n");
    f.render_widget(Paragraph::new(text).wrap(tui::widgets::Wrap { trim: false }), inner);
}

// ---------------------------------------------------------------------------
// Cities tab
// ---------------------------------------------------------------------------

fn draw_cities(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Cities ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cities = &app.state.cities;
    let mut lines: Vec<Line> = Vec::new();

    let search_line = if cities.editing {
        format!("search: {}_", cities.query)
    } else if cities.query.is_empty() {
        "Press / to search for a city to add".to_owned()
    } else {
        format!("search: {}", cities.query)
    };
    let search_style = if cities.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(search_line, search_style)));
    if cities.searching {
        lines.push(Line::from(Span::styled(
            "  searching...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for candidate in &cities.results {
        lines.push(Line::from(Span::styled(
            format!("  + {}", candidate.description),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(""));

    if cities.cities.is_empty() {
        lines.push(Line::from(Span::styled(
            "No cities loaded",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (idx, city) in cities.cities.iter().enumerate() {
        let marker = if idx == cities.selected { '>' } else { ' ' };
        let style = if idx == cities.selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{marker} {} ({})  {}  {} leagues",
                city.display_name, city.province, city.status, city.league_count
            ),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Shared chrome
// ---------------------------------------------------------------------------

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
