use roaslab_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        format!("Error: {}", error.code),
        format!("  {}", error.message),
    ];

    if !error.recovery_steps.is_empty() {
        lines.push(String::new());
        lines.push("Next steps:".to_string());
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}
