pub mod output;

pub use output::{render_archive, render_footer, render_header, render_session, render_state};
