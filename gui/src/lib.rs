pub mod charts;

use analysis::{
    export_to_file, polarity_histogram, polarity_timeline, run_pipeline, validate_url, Gauge,
    HISTOGRAM_BINS,
};
use charts::{GaugeChart, HistogramChart, TimelineChart};
use commentscope_core::{
    AnalysisReport, AppConfig, CommentRecord, CoreError, ErrorExt, PipelineError, Verdict,
};
use iced::widget::{
    button, canvas, column, container, horizontal_rule, row, scrollable, text, text_input, Column,
};
use iced::{Color, Command, Element, Length, Theme};
use tracing::{info, warn};

const TITLE: &str = "YouTube Comments Sentiment Analysis";
const CHART_HEIGHT: f32 = 280.0;
const ERROR_COLOR: Color = Color { r: 0.8, g: 0.1, b: 0.1, a: 1.0 };
const SUCCESS_COLOR: Color = Color { r: 0.13, g: 0.55, b: 0.13, a: 1.0 };
const WARNING_COLOR: Color = Color { r: 0.85, g: 0.55, b: 0.0, a: 1.0 };

#[derive(Debug, Clone)]
pub enum Message {
    UrlChanged(String),
    FetchPressed,
    AnalysisFinished(Result<AnalysisReport, PipelineError>),
    DownloadCsv,
}

/// A finished report together with the charts derived from it.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub report: AnalysisReport,
    histogram: HistogramChart,
    timeline: TimelineChart,
    gauge: Option<GaugeChart>,
}

impl ReportView {
    pub fn new(report: AnalysisReport) -> Self {
        let histogram = HistogramChart::new(polarity_histogram(&report.records, HISTOGRAM_BINS));
        let timeline = TimelineChart::new(polarity_timeline(&report.records));
        let gauge = report
            .summary
            .map(|summary| GaugeChart::new(Gauge::from_score(summary.score)));
        Self {
            report,
            histogram,
            timeline,
            gauge,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ViewState {
    Idle,
    Fetching,
    Failed(String),
    Ready(Box<ReportView>),
}

pub struct App {
    config: AppConfig,
    video_url: String,
    state: ViewState,
    export_status: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            video_url: String::new(),
            state: ViewState::Idle,
            export_status: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn export_status(&self) -> Option<&str> {
        self.export_status.as_deref()
    }

    pub fn update(&mut self, message: Message) -> Result<Command<Message>, CoreError> {
        match message {
            Message::UrlChanged(url) => {
                self.video_url = url;
                Ok(Command::none())
            }
            Message::FetchPressed => {
                if matches!(self.state, ViewState::Fetching) {
                    return Ok(Command::none());
                }

                // Input problems are shown without starting a fetch.
                if let Err(e) = self
                    .config
                    .require_api_key()
                    .and_then(|_| validate_url(&self.video_url))
                {
                    warn!("Rejected input: {}", e);
                    self.state = ViewState::Failed(e.user_friendly_message());
                    return Ok(Command::none());
                }

                info!("Starting analysis for {}", self.video_url.trim());
                self.state = ViewState::Fetching;
                self.export_status = None;

                let url = self.video_url.clone();
                let config = self.config.clone();
                Ok(Command::perform(
                    async move { run_pipeline(&url, &config).await },
                    Message::AnalysisFinished,
                ))
            }
            Message::AnalysisFinished(Ok(report)) => {
                if let Some(error) = &report.fetch_error {
                    warn!("Analysis of {} finished early: {}", report.video_id, error);
                }
                self.state = ViewState::Ready(Box::new(ReportView::new(report)));
                Ok(Command::none())
            }
            Message::AnalysisFinished(Err(e)) => {
                self.state = ViewState::Failed(e.user_friendly_message());
                Ok(Command::none())
            }
            Message::DownloadCsv => {
                let ViewState::Ready(view) = &self.state else {
                    return Ok(Command::none());
                };

                let path = self.config.export_path();
                match export_to_file(&view.report.records, &path) {
                    Ok(()) => {
                        self.export_status = Some(format!("Saved {}", path.display()));
                        Ok(Command::none())
                    }
                    Err(e) => {
                        self.export_status = Some(e.user_friendly_message());
                        Err(e)
                    }
                }
            }
        }
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let title: Element<Message, Theme> = text(TITLE).size(28).into();

        let fetch_button = if matches!(self.state, ViewState::Fetching) {
            button("Fetch and Analyze Comments")
        } else {
            button("Fetch and Analyze Comments").on_press(Message::FetchPressed)
        };

        let input: Element<Message, Theme> = column![
            text("Enter YouTube Video URL: ").size(16),
            text_input("https://www.youtube.com/watch?v=...", &self.video_url)
                .on_input(Message::UrlChanged)
                .on_submit(Message::FetchPressed)
                .padding(8),
            fetch_button,
        ]
        .spacing(10)
        .into();

        let content: Element<Message, Theme> = match &self.state {
            ViewState::Idle => column![].into(),
            ViewState::Fetching => text("Fetching comments...").size(16).into(),
            ViewState::Failed(message) => error_text(message),
            ViewState::Ready(view) => self.report_view(view),
        };

        let main_content: Element<Message, Theme> =
            column![title, input, horizontal_rule(1), content]
                .spacing(20)
                .into();

        container(scrollable(container(main_content).padding(20)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn report_view<'a>(&'a self, view: &'a ReportView) -> Element<'a, Message, Theme> {
        let report = &view.report;
        let mut sections = Column::new().spacing(16);

        if let Some(error) = &report.fetch_error {
            sections = sections.push(error_text(error));
        }
        sections = sections.push(text(report.fetched_message()).size(16));
        sections = sections.push(comment_table(&report.records));

        sections = sections
            .push(text("Sentiment Distribution").size(20))
            .push(
                canvas(view.histogram.clone())
                    .width(Length::Fill)
                    .height(Length::Fixed(CHART_HEIGHT)),
            )
            .push(text("Sentiment Over Time").size(20))
            .push(
                canvas(view.timeline.clone())
                    .width(Length::Fill)
                    .height(Length::Fixed(CHART_HEIGHT)),
            );

        if let (Some(summary), Some(gauge), Some(score_message)) =
            (report.summary, &view.gauge, report.score_message())
        {
            sections = sections
                .push(text(score_message).size(20))
                .push(
                    canvas(gauge.clone())
                        .width(Length::Fixed(CHART_HEIGHT))
                        .height(Length::Fixed(CHART_HEIGHT)),
                )
                .push(verdict_text(summary.verdict));
        }

        sections = sections.push(button("Download data as CSV").on_press(Message::DownloadCsv));
        if let Some(status) = &self.export_status {
            sections = sections.push(text(status).size(14));
        }

        sections.into()
    }
}

fn error_text<'a>(message: &str) -> Element<'a, Message, Theme> {
    text(message).size(16).style(ERROR_COLOR).into()
}

pub fn verdict_color(verdict: Verdict) -> Color {
    if verdict.is_useful() {
        SUCCESS_COLOR
    } else {
        WARNING_COLOR
    }
}

fn verdict_text<'a>(verdict: Verdict) -> Element<'a, Message, Theme> {
    text(verdict.message())
        .size(16)
        .style(verdict_color(verdict))
        .into()
}

fn table_row<'a>(
    author: String,
    comment: String,
    likes: String,
    time: String,
    sentiment: String,
) -> Element<'a, Message, Theme> {
    row![
        text(author).size(13).width(Length::FillPortion(2)),
        text(comment).size(13).width(Length::FillPortion(6)),
        text(likes).size(13).width(Length::FillPortion(1)),
        text(time).size(13).width(Length::FillPortion(2)),
        text(sentiment).size(13).width(Length::FillPortion(1)),
    ]
    .spacing(8)
    .into()
}

fn comment_table<'a>(records: &[CommentRecord]) -> Element<'a, Message, Theme> {
    let header = table_row(
        "Author".to_string(),
        "Comment".to_string(),
        "Likes".to_string(),
        "Time".to_string(),
        "Sentiment".to_string(),
    );

    let mut table = Column::new().spacing(4).push(header).push(horizontal_rule(1));
    for record in records {
        table = table.push(table_row(
            record.author.clone(),
            record.text.clone(),
            record.like_count.to_string(),
            record.published_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{:.3}", record.polarity),
        ));
    }

    container(table).padding(10).into()
}
