use crate::models::{ActionItem, Priority};

pub const MAX_NEXT_STEPS: usize = 3;
const NO_NEXT_STEPS: &str = "No specific next steps identified";

/// Turn the leading action items into short follow-up lines.
pub fn generate_next_steps(action_items: &[ActionItem]) -> Vec<String> {
    if action_items.is_empty() {
        return vec![NO_NEXT_STEPS.to_string()];
    }

    action_items
        .iter()
        .take(MAX_NEXT_STEPS)
        .map(|item| match item.priority {
            Priority::High => format!("Urgent: {} (assigned to {})", item.task, item.assignee),
            Priority::Medium => format!("Follow up on: {}", item.task),
            Priority::Low => format!("Monitor: {}", item.task),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionStatus;

    fn item(task: &str, priority: Priority) -> ActionItem {
        ActionItem {
            id: format!("ai_{}", task.len()),
            task: task.to_string(),
            assignee: "Dana".to_string(),
            due_date: "TBD".to_string(),
            priority,
            status: ActionStatus::Pending,
        }
    }

    #[test]
    fn test_next_steps_by_priority() {
        let steps = generate_next_steps(&[
            item("fix the outage", Priority::High),
            item("send the recap", Priority::Medium),
            item("tidy the wiki", Priority::Low),
            item("never shown", Priority::Low),
        ]);
        assert_eq!(
            steps,
            vec![
                "Urgent: fix the outage (assigned to Dana)",
                "Follow up on: send the recap",
                "Monitor: tidy the wiki",
            ]
        );
    }

    #[test]
    fn test_no_action_items() {
        assert_eq!(generate_next_steps(&[]), vec![NO_NEXT_STEPS]);
    }
}
