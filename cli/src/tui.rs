use std::{io, time::Duration};

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parcelcal_core::{build_report, AppData, AppDataRepository, DayCell, MonthReport, YearMonth};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Padding, Paragraph},
};

use crate::report::thousands;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    achieved: Color,
    today: Color,
    over: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    achieved: Color::Green,
    today: Color::Blue,
    over: Color::Red,
};

pub struct MonthBrowser {
    data: AppData,
    today: NaiveDate,
    report: MonthReport,
}

impl MonthBrowser {
    pub fn new(data: AppData, month: YearMonth, today: NaiveDate) -> Self {
        let report = build_report(&data, month, today);
        Self { data, today, report }
    }

    pub fn month(&self) -> YearMonth {
        self.report.month
    }

    fn show(&mut self, month: YearMonth) {
        self.report = build_report(&self.data, month, self.today);
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.month().succ() {
            self.show(next);
        }
    }

    pub fn previous_month(&mut self) {
        if let Some(prev) = self.month().pred() {
            self.show(prev);
        }
    }

    pub fn go_to_today(&mut self) {
        self.show(YearMonth::of(self.today));
    }
}

pub fn run<R: AppDataRepository>(repo: &R, month: YearMonth, today: NaiveDate) -> Result<()> {
    let data = repo.load()?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = MonthBrowser::new(data, month, today);
    let res = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut MonthBrowser,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_month(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_month(),
                        KeyCode::Char('t') => app.go_to_today(),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &MonthBrowser) {
    let report = &app.report;
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Calendar + Summary
            Constraint::Length(8), // Weekly chart
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    // --- Header ---
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(1), Constraint::Length(30)])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        "PARCEL CALENDAR",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(THEME.text)),
        Span::styled(
            format!(" {} (goal {}/day) ", report.month, report.daily_goal),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(THEME.text)),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);
    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(THEME.muted)),
        main_layout[0],
    );

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Length(1),
            Constraint::Percentage(40),
        ])
        .split(main_layout[1]);

    draw_calendar(frame, report, content[0]);
    draw_summary(frame, report, content[2]);
    draw_weeks(frame, report, main_layout[2]);

    let help = Line::from(vec![
        Span::styled("MONTH: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("TODAY: ", Style::default().fg(THEME.muted)),
        Span::styled("t", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(
        Paragraph::new(help).alignment(Alignment::Center),
        main_layout[3],
    );
}

fn day_span(day: &DayCell) -> Span<'static> {
    let n = day.date.day();
    if day.is_holiday {
        return Span::styled(
            format!(" {:>2}  off ", n),
            Style::default().fg(THEME.muted).add_modifier(Modifier::CROSSED_OUT),
        );
    }
    match day.count {
        Some(count) if count > 0 => {
            let mark = if day.goal_met { '*' } else { ' ' };
            Span::styled(
                format!(" {:>2} {:>3}{} ", n, count, mark),
                Style::default().fg(THEME.achieved).add_modifier(Modifier::BOLD),
            )
        }
        _ if day.is_today => Span::styled(
            format!("[{:>2}]     ", n),
            Style::default().fg(THEME.today).add_modifier(Modifier::BOLD),
        ),
        _ => Span::styled(format!(" {:>2}      ", n), Style::default().fg(THEME.text)),
    }
}

fn draw_calendar(frame: &mut Frame, report: &MonthReport, area: Rect) {
    let header: Vec<Span> = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        .iter()
        .map(|d| Span::styled(format!(" {:<8}", d), Style::default().fg(THEME.muted)))
        .collect();
    let mut lines = vec![Line::from(header), Line::from("")];

    let mut week: Vec<Span> = vec![Span::raw(" ".repeat(9)); report.leading_blanks];
    for day in &report.days {
        week.push(day_span(day));
        if week.len() == 7 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }

    let calendar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Calendar "),
    );
    frame.render_widget(calendar, area);
}

fn draw_summary(frame: &mut Frame, report: &MonthReport, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(area);

    let stats = &report.monthly;
    let remaining = if stats.is_goal_reached() {
        Span::styled(
            format!("goal reached, {} over", thousands(stats.remaining_count.abs())),
            Style::default().fg(THEME.over).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            thousands(stats.remaining_count),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        )
    };

    let info_text = vec![
        Line::from(vec![Span::styled("Overview", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Working days: ", Style::default().fg(THEME.muted)),
            Span::styled(stats.total_working_days.to_string(), Style::default().fg(THEME.text)),
        ]),
        Line::from(vec![
            Span::styled("Month goal:   ", Style::default().fg(THEME.muted)),
            Span::styled(
                thousands(stats.monthly_total_goal as i64),
                Style::default().fg(THEME.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("Achieved:     ", Style::default().fg(THEME.muted)),
            Span::styled(
                thousands(stats.current_total_achieved as i64),
                Style::default().fg(THEME.achieved).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![Span::styled("Remaining:    ", Style::default().fg(THEME.muted)), remaining]),
    ];
    let info = Paragraph::new(info_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(info, chunks[0]);

    let ratio = f64::from(stats.progress_percentage) / 100.0;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Monthly Progress ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted)),
        )
        .gauge_style(Style::default().fg(if ratio > 1.0 { THEME.over } else { THEME.achieved }))
        .ratio(ratio.min(1.0))
        .label(format!("{}%", stats.progress_percentage));
    frame.render_widget(gauge, chunks[1]);
}

fn draw_weeks(frame: &mut Frame, report: &MonthReport, area: Rect) {
    let bars: Vec<Bar> = report
        .weeks
        .iter()
        .map(|week| {
            let color = if week.total >= week.goal { THEME.over } else { THEME.achieved };
            Bar::default()
                .label(format!("W{}", week.week_number))
                .value(u64::from(week.achievement))
                .style(Style::default().fg(color))
                .text_value(format!("{}%", week.achievement))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted))
                .title(" Weekly Achievement "),
        )
        .bar_width(6)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars))
        .max(120);
    frame.render_widget(chart, area);
}
