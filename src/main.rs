use commentscope_core::{AppConfig, CoreError};
use gui::App;
use iced::{Application, Settings};

fn main() -> Result<(), CoreError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "commentscope=debug,gui=debug,analysis=debug,youtube_client=debug".into()
            }),
        )
        .init();

    tracing::info!("Starting CommentScope - YouTube comment sentiment dashboard");

    let config = AppConfig::load()?;
    if config.api_key().is_none() {
        tracing::warn!("No YouTube API key configured; set YOUTUBE_API_KEY before fetching");
    }

    let settings = Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1200.0, 900.0),
            min_size: Some(iced::Size::new(800.0, 600.0)),
            ..Default::default()
        },
        ..Settings::with_flags(config)
    };

    CommentScopeApp::run(settings).map_err(|e| {
        tracing::error!("Application error: {}", e);
        CoreError::Internal {
            message: format!("GUI error: {e}"),
        }
    })
}

struct CommentScopeApp {
    app: App,
}

impl Application for CommentScopeApp {
    type Message = gui::Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = AppConfig;

    fn new(flags: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        tracing::info!("Initializing application");
        (Self { app: App::new(flags) }, iced::Command::none())
    }

    fn title(&self) -> String {
        "YouTube Comments Sentiment Analysis".to_string()
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        match self.app.update(message) {
            Ok(command) => command,
            Err(e) => {
                tracing::error!("Update error: {}", e);
                iced::Command::none()
            }
        }
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }
}
