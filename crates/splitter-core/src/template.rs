//! The wrapper written around each extracted body.

use serde::{Deserialize, Serialize};

/// Settings for the generated handler module.
///
/// The rendered file imports the client type, exports an async function
/// taking `(args, client)`, and runs the extracted body inside a `try` whose
/// `catch` re-throws with the block name and the original message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapperTemplate {
    /// Import line placed at the top of the file.
    pub import: String,
    /// Type annotation of the `client` parameter.
    pub client_type: String,
    /// Extension of generated files, without the dot.
    pub extension: String,
}

impl Default for WrapperTemplate {
    fn default() -> Self {
        Self {
            import: "import { Client } from 'xrpl';".to_string(),
            client_type: "Client".to_string(),
            extension: "ts".to_string(),
        }
    }
}

impl WrapperTemplate {
    /// Render the module for block `name` with the given wrapper function name.
    pub fn render(&self, function_name: &str, name: &str, body: &str) -> String {
        format!(
            "{import}

export async function {function_name}(
  args: any,
  client: {client_type}
): Promise<{{ content: Array<{{ type: string; text: string }}> }}> {{
  try {{
    {body}
  }} catch (error: any) {{
    throw new Error(`Failed to execute {name}: ${{error.message}}`);
  }}
}}
",
            import = self.import,
            client_type = self.client_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_matches_handler_module_layout() {
        let rendered = WrapperTemplate::default().render(
            "handleGetBalance",
            "xrp_get_balance",
            "const balance = await client.getXrpBalance(args.address);\n    return fmt(balance);",
        );

        insta::assert_snapshot!(rendered.trim_end(), @r###"
        import { Client } from 'xrpl';

        export async function handleGetBalance(
          args: any,
          client: Client
        ): Promise<{ content: Array<{ type: string; text: string }> }> {
          try {
            const balance = await client.getXrpBalance(args.address);
            return fmt(balance);
          } catch (error: any) {
            throw new Error(`Failed to execute xrp_get_balance: ${error.message}`);
          }
        }
        "###);
    }

    #[test]
    fn custom_client_type_and_import() {
        let template = WrapperTemplate {
            import: "import type { Api } from './api';".into(),
            client_type: "Api".into(),
            extension: "mts".into(),
        };
        let rendered = template.render("handleX", "xrp_x", "return 1;");

        assert!(rendered.starts_with("import type { Api } from './api';\n\n"));
        assert!(rendered.contains("  client: Api\n"));
        assert!(rendered.contains("    return 1;\n"));
    }
}
