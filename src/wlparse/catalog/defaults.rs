//! Built-in target lists
//!
//! These reproduce the report layout the tool was first written against. The
//! lookup strings are copied from real summary files, including their odd
//! spacing ("C-State  Summary"), and must stay byte-for-byte.

use super::TargetDescriptor;

fn target(key: &str, lookup: &str, description: &str) -> TargetDescriptor {
    TargetDescriptor::new(key, lookup).with_description(description)
}

pub(crate) fn socwatch_targets() -> Vec<TargetDescriptor> {
    vec![
        target("CPU_model", "CPU native model", "CPU model information"),
        target(
            "PCH_SLP50",
            "PCH SLP-S0 State Summary: Residency (Percentage and Time)",
            "PCH SLP-S0 state residency",
        ),
        target(
            "S0ix_Substate",
            "S0ix Substate Summary: Residency (Percentage and Time)",
            "S0ix substate residency",
        ),
        target(
            "PKG_Cstate",
            "Platform Monitoring Technology CPU Package C-States Residency Summary: Residency (Percentage and Time)",
            "CPU package C-state residency",
        ),
        target(
            "Core_Cstate",
            "Core C-State Summary: Residency (Percentage and Time)",
            "Core C-state residency",
        ),
        target(
            "Core_Concurrency",
            "CPU Core Concurrency (OS)",
            "CPU core concurrency",
        ),
        target(
            "ACPI_Cstate",
            "Core C-State (OS) Summary: Residency (Percentage and Time)",
            "ACPI C-state residency",
        ),
        target(
            "OS_wakeups",
            "Processes by Platform Busy Duration",
            "OS wakeup events",
        ),
        target(
            "CPU-iGPU",
            "CPU-iGPU Concurrency Summary: Residency (Percentage and Time)",
            "CPU-iGPU concurrency",
        ),
        target(
            "CPU_Pavr",
            "CPU P-State Average Frequency (excluding CPU idle time)",
            "CPU P-state average frequency",
        ),
        target(
            "CPU_Pstate",
            "CPU P-State/Frequency Summary: Residency (Percentage and Time)",
            "CPU P-state residency",
        ),
        target(
            "RC_Cstate",
            "Integrated Graphics C-State  Summary: Residency (Percentage and Time)",
            "Graphics C-state residency",
        ),
        target(
            "DDR_BW",
            "DDR Bandwidth Requests by Component Summary: Average Rate and Total",
            "DDR bandwidth",
        ),
        target(
            "IO_BW",
            "IO Bandwidth Summary: Average Rate and Total",
            "IO bandwidth",
        ),
        target(
            "VC1_BW",
            "Display VC1 Bandwidth Summary: Average Rate and Total",
            "Display VC1 bandwidth",
        ),
        target(
            "NPU_BW",
            "Neural Processing Unit (NPU) to Memory Bandwidth Summary: Average Rate and Total",
            "NPU bandwidth",
        ),
        target(
            "Media_BW",
            "Media to Network on Chip (NoC) Bandwidth Summary: Average Rate and Total",
            "Media bandwidth",
        ),
        target(
            "IPU_BW",
            "Image Processing Unit (IPU) to Network on Chip (NoC) Bandwidth Summary: Average Rate and Total",
            "IPU bandwidth",
        ),
        target(
            "CCE_BW",
            "CCE to Network on Chip (NoC) Bandwidth Summary: Average Rate and Total",
            "CCE bandwidth",
        ),
        target(
            "GT_BW",
            "Chip GT Bandwidth Summary: Average Rate and Total",
            "GT bandwidth",
        ),
        target(
            "D2D_BW",
            "Chip Die to Die Bandwidth Summary: Average Rate and Total",
            "Die-to-die bandwidth",
        ),
        target(
            "CPU_temp",
            "Temperature Metrics Summary - Sampled: Min/Max/Avg",
            "CPU temperature",
        ),
        target(
            "SoC_temp",
            "SoC Domain Temperatures Summary - Sampled: Min/Max/Avg",
            "SoC temperature",
        ),
        target(
            "NPU_Dstate",
            "Neural Processing Unit (NPU) D-State Residency Summary: Residency (Percentage and Time)",
            "NPU D-state residency",
        ),
        target(
            "PMC+SLP_S0",
            "PCH Active State (as percentage of PMC Active plus SLP_S0 Time) Summary: Residency (Percentage)",
            "PCH active state",
        ),
        target(
            "DC_count",
            "Dynamic Display State Enabling",
            "Dynamic display state",
        ),
        target(
            "Media_Cstate",
            "Media C-State Residency Summary: Residency (Percentage and Time)",
            "Media C-state residency",
        ),
        target(
            "NPU_Pstate",
            "Neural Processing Unit (NPU) P-State Summary - Sampled: Approximated Residency (Percentage)",
            "NPU P-state with bucketing",
        )
        .with_buckets(["0", "1900", "1901-2900", "2901-3899", "3900"]),
        target(
            "MEMSS_Pstate",
            "Memory Subsystem (MEMSS) P-State Summary - Sampled: Approximated Residency (Percentage)",
            "Memory subsystem P-state",
        ),
        target(
            "NoC_Pstate",
            "Network on Chip (NoC) P-State Summary - Sampled: Approximated Residency (Percentage)",
            "NoC P-state with bucketing",
        )
        .with_buckets(["400", "401-1049", "1050"]),
        target(
            "iGFX_Pstate",
            "Integrated Graphics P-State/Frequency Summary - Sampled: Approximated Residency (Percentage)",
            "iGFX P-state with bucketing",
        )
        .with_buckets(["0", "400", "401-1799", "1800-2049", "2050"]),
    ]
}

pub(crate) fn pcie_targets() -> Vec<TargetDescriptor> {
    vec![
        target(
            "PCIe_LPM",
            "PCIe LPM Summary - Sampled: Approximated Residency (Percentage)",
            "PCIe Low Power Mode",
        )
        .with_devices(["NVM"]),
        target(
            "PCIe_Active",
            "PCIe Link Active Summary - Sampled: Approximated Residency (Percentage)",
            "PCIe Link Active",
        )
        .with_devices(["NVM"]),
        target(
            "PCIe_LTRsnoop",
            "PCIe LTR Snoop Summary - Sampled: Histogram",
            "PCIe LTR Snoop",
        )
        .with_devices(["NVM"]),
    ]
}
