pub mod constants;
pub mod settings;

pub use settings::{
    AllowedOrigins, ApplicationSetting, AuthSetting, PostgresSetting, TokenSetting,
    UserServiceSetting,
};
