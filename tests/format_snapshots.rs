//! Formatter output snapshots

use wlparse::wlparse::formats::FormatRegistry;
use wlparse::{parse_document, TargetCatalog, TargetDescriptor};

fn core_cstate_mapping() -> wlparse::ResultMapping {
    let catalog = TargetCatalog::new(vec![
        TargetDescriptor::new("Core_Cstate", "Core C-State Summary"),
        TargetDescriptor::new("DDR_BW", "DDR Bandwidth"),
    ])
    .unwrap();
    parse_document(
        "Core C-State Summary: Residency (Percentage and Time)\n---\nState,C0 (%),C1 (%)\nA,45.2,32.1\n\nDDR Bandwidth\nComponent,Total,Rate\nTotal,5400,180.456\n",
        &catalog,
    )
}

#[test]
fn test_simple_format() {
    let output = FormatRegistry::with_defaults()
        .serialize(&core_cstate_mapping(), "simple")
        .unwrap();
    insta::assert_snapshot!(output, @r###"
    Core_Cstate	State	A
    Core_Cstate	C0 (%)	45.2
    Core_Cstate	C1 (%)	32.1
    DDR_BW	DDR_BW_AvrRt(MB/s)	180.46
    "###);
}

#[test]
fn test_json_format() {
    let output = FormatRegistry::with_defaults()
        .serialize(&core_cstate_mapping(), "json")
        .unwrap();
    insta::assert_snapshot!(output, @r###"
    {
      "State        Core_Cstate": "A",
      "C0 (%)        Core_Cstate": 45.2,
      "C1 (%)        Core_Cstate": 32.1,
      "DDR_BW_AvrRt(MB/s)        DDR_BW": 180.46
    }
    "###);
}
