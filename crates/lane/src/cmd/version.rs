use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("lane {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: lane");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("LANE_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("LANE_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!("host_endian: {:?}", lane_lucid::Endian::native());
    println!(
        "formats: ldat (read, write), {} (read, write)",
        lane_text::LANE_EXTENSION
    );

    Ok(SUCCESS)
}
