pub mod app_config;
pub mod recaptcha;
pub mod sheet_client;
mod upstream;

pub use recaptcha::RecaptchaClient;
pub use sheet_client::SheetClient;
