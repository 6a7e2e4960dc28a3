mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod verify_email;
pub use verify_email::{ConfirmEmail, VerifyEmail};

mod reset_password;
pub use reset_password::{ForgotPassword, ResetPassword};

mod app_layout;
pub use app_layout::{AppLayout, NotFound};

mod pages;
pub use pages::{
    Allotment, Browse, EditGuide, GuideDetail, Guides, NewGuide, Preferences, Profile,
};
