mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod landing;
pub use landing::LandingView;

mod dashboard;
pub use dashboard::DashboardView;

mod shell;
pub use shell::AppShell;
