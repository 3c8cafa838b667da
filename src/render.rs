use crate::store::{Parameter, Tool};

pub fn render_tools(tools: &[Tool]) -> String {
    if tools.is_empty() {
        return "(no tools)\n".to_string();
    }
    tools.iter().map(render_tool).collect::<Vec<_>>().join("\n")
}

pub fn render_tool(tool: &Tool) -> String {
    let mut out = format!(
        "Tool {}\n  Function Name: {}\n  Description:   {}\n  Parameters:\n",
        tool.id,
        placeholder(&tool.name),
        placeholder(&tool.description)
    );
    if tool.parameters.is_empty() {
        out.push_str("    (none)\n");
    }
    for param in &tool.parameters {
        out.push_str(&render_parameter(param));
    }
    out
}

pub fn render_parameter(param: &Parameter) -> String {
    let required = if param.required { " required" } else { "" };
    let mut line = format!(
        "    [{}] {} : {}{}",
        param.id,
        placeholder(&param.name),
        param.kind,
        required
    );
    if !param.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&param.description);
    }
    line.push('\n');
    line
}

fn placeholder(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ParamType, ParameterUpdate, ToolSetStore, ToolUpdate};

    #[test]
    fn empty_store_renders_marker() {
        assert_eq!(render_tools(&[]), "(no tools)\n");
    }

    #[test]
    fn tool_form_lists_parameters() {
        let mut store = ToolSetStore::new();
        let id = store.add_tool().id;
        store.update_tool(id, ToolUpdate::Name("add".into()));
        let pid = store.add_parameter(id).expect("param").id;
        store.update_parameter(id, pid, ParameterUpdate::Name("a".into()));
        store.update_parameter(id, pid, ParameterUpdate::Type(ParamType::Number));
        store.update_parameter(id, pid, ParameterUpdate::Required(true));
        store.update_parameter(id, pid, ParameterUpdate::Description("left".into()));
        store.add_parameter(id);

        let text = render_tools(store.tools());
        assert!(text.starts_with("Tool 1\n"));
        assert!(text.contains("Function Name: add"));
        assert!(text.contains("Description:   (empty)"));
        assert!(text.contains("[1] a : number required - left"));
        assert!(text.contains("[2] (empty) : string\n"));
    }

    #[test]
    fn tool_without_parameters_shows_none() {
        let mut store = ToolSetStore::new();
        store.add_tool();
        assert_eq!(
            render_tools(store.tools()),
            "Tool 1\n  Function Name: (empty)\n  Description:   (empty)\n  Parameters:\n    (none)\n"
        );
    }
}
