use clatter::{ImpactMaterial, ScrapeMaterial, UnsizedImpactMaterial};

use crate::cli_args::ListMaterialsArgs;

pub fn run(args: &ListMaterialsArgs) -> anyhow::Result<()> {
    if args.scrape {
        for m in ScrapeMaterial::ALL {
            println!("{}", m.name());
        }
    } else {
        for u in UnsizedImpactMaterial::ALL {
            for bucket in 0..6u8 {
                println!("{}", ImpactMaterial::new(*u, bucket).name());
            }
        }
    }
    Ok(())
}
