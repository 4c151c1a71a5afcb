pub mod career;
pub mod defaults;
pub mod resume;
pub mod style;

pub use career::CareerFocus;
pub use resume::{Education, Experience, PersonalInfo, Project, ResumeData, Skill};
pub use style::{FontSize, ResumeFont, ResumeLayout, ResumeStyle};
