//! Run statistics collection and reporting.

/// Counters accumulated over a run by either engine.
#[derive(Clone, Default, Debug)]
pub struct SimStats {
    pub instructions_retired: u64,

    pub inst_alu: u64,
    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_branch: u64,
    pub inst_jump: u64,

    pub branches_taken: u64,

    /// Pipelined engine only: stalls inserted by the hazard detector.
    pub stalls_data: u64,
    /// Pipelined engine only: wrong-path entries squashed after a taken
    /// branch or jump.
    pub squashed: u64,
}

impl SimStats {
    /// Prints the accumulated counters as a sectioned report.
    pub fn print(&self) {
        println!("\n=========================================================");

        println!("\n[General]");
        println!("  Instructions Retired: {}", self.instructions_retired);

        println!("\n[Instruction Mix]");
        let total = self.instructions_retired as f64;
        if total > 0.0 {
            let pct = |n: u64| (n as f64 / total) * 100.0;
            println!("  ALU Operations:       {:<10} ({:.2}%)", self.inst_alu, pct(self.inst_alu));
            println!("  Loads:                {:<10} ({:.2}%)", self.inst_load, pct(self.inst_load));
            println!("  Stores:               {:<10} ({:.2}%)", self.inst_store, pct(self.inst_store));
            println!("  Branches:             {:<10} ({:.2}%)", self.inst_branch, pct(self.inst_branch));
            println!("  Jumps:                {:<10} ({:.2}%)", self.inst_jump, pct(self.inst_jump));
        }

        println!("\n[Control Flow]");
        if self.inst_branch > 0 {
            println!(
                "  Branches Taken:       {:.2}% ({} / {})",
                (self.branches_taken as f64 / self.inst_branch as f64) * 100.0,
                self.branches_taken,
                self.inst_branch
            );
        } else {
            println!("  No branches executed.");
        }

        println!("\n[Pipeline]");
        println!("  Data-Hazard Stalls:   {}", self.stalls_data);
        println!("  Squashed Entries:     {}", self.squashed);

        println!("=========================================================\n");
    }
}
