//! `rtn dir`: show or change the text direction.

use anyhow::Result;
use console::style;

use routinely_types::preferences::TextDirection;

use crate::state::AppState;

use super::DirAction;

pub async fn run(state: &mut AppState, action: Option<DirAction>, json: bool) -> Result<()> {
    let direction = match action.unwrap_or(DirAction::Show) {
        DirAction::Show => state.app.direction(),
        DirAction::Toggle => state.app.toggle_direction().await?,
        DirAction::Ltr => {
            state.app.set_direction(TextDirection::Ltr).await?;
            TextDirection::Ltr
        }
        DirAction::Rtl => {
            state.app.set_direction(TextDirection::Rtl).await?;
            TextDirection::Rtl
        }
    };

    if json {
        println!("{}", serde_json::json!({"dir": direction}));
    } else {
        let label = match direction {
            TextDirection::Ltr => "left-to-right",
            TextDirection::Rtl => "right-to-left",
        };
        println!(
            "  {} Text direction: {} {}",
            style("•").dim(),
            style(direction).cyan().bold(),
            style(format!("({label})")).dim()
        );
    }
    Ok(())
}
