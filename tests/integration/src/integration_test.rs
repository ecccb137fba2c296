//! End-to-end extraction scenarios
//!
//! Each test builds a small project on disk (a dispatch document plus a tool
//! table document), runs a full session through the disk sink, and checks
//! the generated `tools/` tree.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use splitter_blocks::Termination;
use splitter_core::{Emitted, ExtractionSession, SessionReport, SplitterConfig};
use splitter_fs::{ConfigStore, DiskSink, NormalizedPath};
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

const INDEX_TS: &str = r#"import { Client } from 'xrpl';

server.setRequestHandler(CallToolRequestSchema, async (request) => {
  const { name, arguments: args } = request.params;
  switch (name) {
    case 'xrp_get_account_info': {
      const info = await client.request({ command: 'account_info', account: args.account });
      return { content: [{ type: 'text', text: JSON.stringify(info.result) }] };
    }
    case 'xrp_create_wallet': {
      const wallet = Wallet.generate();
      return { content: [{ type: 'text', text: `Address: ${wallet.address}` }] };
    }
    case 'xrp_get_server_info': {
      // keep "}" in strings out of the depth count
      const label = "server } info";
      return { content: [{ type: 'text', text: label }] };
    }
    default:
      throw new Error(`Unknown tool: ${name}`);
  }
});
"#;

const ADDITIONAL_TS: &str = r#"export const additionalTools = [
  {
    name: 'xrp_create_wallet',
    description: 'Duplicate of the primary handler',
    handler: async (args: any) => {
      return { content: [{ type: 'text', text: 'secondary' }] };
    },
  },
  {
    name: 'xrp_mint_nft',
    description: 'Mint an NFT',
    handler: async (args: any, client: Client) => {
      const tx = { TransactionType: 'NFTokenMint', Account: args.account, NFTokenTaxon: 0 };
      return { content: [{ type: 'text', text: JSON.stringify(tx) }] };
    },
  },
  {
    name: 'xrp_get_offers',
    description: 'Handled elsewhere',
    handler: handleGetOffers,
  },
  {
    name: 'xrp_cancel_escrow',
    handler: async function (args: any) {
      return { content: [{ type: 'text', text: 'cancelled' }] };
    },
  },
];
"#;

/// Project directory with the stock document layout
struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    /// Create a project with `src/index.ts` and `src/additional-tools.ts`
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.ts"), INDEX_TS).unwrap();
        fs::write(src.join("additional-tools.ts"), ADDITIONAL_TS).unwrap();
        Self { temp_dir }
    }

    fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default configuration resolved against the project root
    fn config(&self) -> SplitterConfig {
        SplitterConfig::default().rebase(self.root())
    }

    fn run(&self, config: &SplitterConfig, dry_run: bool) -> SessionReport {
        let session =
            ExtractionSession::from_config(config, Arc::new(DiskSink::new()), dry_run).unwrap();
        let documents = ExtractionSession::load(config).unwrap();
        session.run(&documents).unwrap()
    }

    fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.is_file(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}

// =============================================================================
// Full runs
// =============================================================================

mod full_run {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stock_layout_produces_categorized_tree() {
        let project = TestProject::new();
        let report = project.run(&project.config(), false);

        let counts: Vec<_> = report
            .documents
            .iter()
            .map(|d| (d.label.as_str(), d.extracted, d.skipped))
            .collect();
        assert_eq!(
            counts,
            vec![("main index.ts", 3, 0), ("additional tools", 2, 1)]
        );
        assert_eq!(report.total(), 5);

        project.assert_file_exists("src/tools/core/xrp-get-account-info.ts");
        project.assert_file_exists("src/tools/wallet/xrp-create-wallet.ts");
        project.assert_file_exists("src/tools/core/xrp-get-server-info.ts");
        project.assert_file_exists("src/tools/nft/xrp-mint-nft.ts");
        project.assert_file_exists("src/tools/escrow/xrp-cancel-escrow.ts");
        project.assert_file_not_exists("src/tools/dex/xrp-get-offers.ts");
    }

    #[test]
    fn generated_module_wraps_full_body() {
        let project = TestProject::new();
        project.run(&project.config(), false);

        let path = "src/tools/core/xrp-get-account-info.ts";
        project.assert_file_contains(path, "import { Client } from 'xrpl';");
        project.assert_file_contains(path, "export async function handleGetAccountInfo(");
        project.assert_file_contains(path, "client: Client");
        project.assert_file_contains(path, "command: 'account_info'");
        project.assert_file_contains(path, "JSON.stringify(info.result) }] };");
        project.assert_file_contains(
            path,
            "throw new Error(`Failed to execute xrp_get_account_info: ${error.message}`);",
        );
    }

    #[test]
    fn braces_in_strings_do_not_end_body() {
        let project = TestProject::new();
        project.run(&project.config(), false);

        project.assert_file_contains(
            "src/tools/core/xrp-get-server-info.ts",
            "return { content: [{ type: 'text', text: label }] };",
        );
    }

    #[test]
    fn primary_document_wins_shared_name() {
        let project = TestProject::new();
        let report = project.run(&project.config(), false);

        let path = "src/tools/wallet/xrp-create-wallet.ts";
        project.assert_file_contains(path, "Wallet.generate()");
        assert!(!project.read(path).contains("'secondary'"));
        assert_eq!(report.documents[1].files[0].outcome, Emitted::Skipped);
    }

    #[test]
    fn rerun_leaves_existing_files_untouched() {
        let project = TestProject::new();
        project.run(&project.config(), false);

        let path = "src/tools/nft/xrp-mint-nft.ts";
        fs::write(project.root().join(path), "// edited by hand\n").unwrap();

        let report = project.run(&project.config(), false);

        assert_eq!(report.total(), 0);
        assert_eq!(report.total_skipped(), 6);
        assert_eq!(project.read(path), "// edited by hand\n");
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let project = TestProject::new();
        let config = project.config();

        let preview = project.run(&config, true);
        project.assert_file_not_exists("src/tools");

        let report = project.run(&config, false);
        assert_eq!(preview, report);
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configured_run {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn config_file_drives_layout_and_template() {
        let project = TestProject::new();
        let config_path = project.root().join("splitter.toml");
        fs::write(
            &config_path,
            r#"output_root = "generated"

[template]
import = "import { XrplClient } from './client.js';"
client_type = "XrplClient"
extension = "js"

[categories]
xrp_get_server_info = "help"
"#,
        )
        .unwrap();

        let config: SplitterConfig = ConfigStore::new()
            .load(&NormalizedPath::new(&config_path))
            .unwrap();
        let config = config.rebase(project.root());
        let report = project.run(&config, false);

        assert_eq!(report.total(), 5);
        project.assert_file_exists("generated/tools/help/xrp-get-server-info.js");
        project.assert_file_contains(
            "generated/tools/core/xrp-get-account-info.js",
            "client: XrplClient",
        );
        project.assert_file_not_exists("src/tools");
    }

    #[test]
    fn saved_config_loads_back_unchanged() {
        let project = TestProject::new();
        let mut config = SplitterConfig::default();
        config.termination = Termination::SingleNesting;
        config.prefix = "sol_".to_string();

        let path = NormalizedPath::new(project.root().join("effective.toml"));
        let store = ConfigStore::new();
        store.save(&path, &config).unwrap();
        let loaded: SplitterConfig = store.load(&path).unwrap();

        assert_eq!(loaded, config);
    }
}

// =============================================================================
// Termination rules
// =============================================================================

mod termination {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn legacy_rule_truncates_deeply_nested_body() {
        let project = TestProject::new();
        let mut config = project.config();
        config.termination = Termination::SingleNesting;

        project.run(&config, false);

        let path = "src/tools/core/xrp-get-account-info.ts";
        project.assert_file_contains(path, "command: 'account_info'");
        assert!(!project.read(path).contains("}] };"));
    }

    #[test]
    fn balanced_rule_is_default() {
        assert_eq!(SplitterConfig::default().termination, Termination::Balanced);
    }
}
