mod change_password;
mod helpers;
mod login;
mod logout;
mod refresh_token;
mod register;
