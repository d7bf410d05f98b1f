pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_action, prompt_cap, prompt_caps, prompt_meal_types, prompt_path, prompt_pick_meal,
    prompt_remove_position, prompt_yes_no, run_interactive, search_meals, MenuAction,
};
pub use render::{display_meals, display_plan, macro_badge, progress_bar, sort_for_display};
