pub mod route_table;

pub use route_table::{
    Guard, Resolution, Route, RouteTable, View, CHAT_PATH, FORGOT_PATH, HOME_PATH, LOGIN_PATH,
    SIGNUP_PATH,
};
