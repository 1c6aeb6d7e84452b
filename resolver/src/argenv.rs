use clap::Parser;

//
// system arguments and environment for the service
//

pub(crate) const DEFAULT_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 0;

#[derive(Parser, Debug)]
#[command(name = "didresolver", version = "0.1.1", about = "DID Resolution Gateway")]
pub struct Args {
    #[arg(short = 'p', long = "port", env = "RESOLVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    #[arg(short = 's', long = "host", env = "RESOLVER_HOST", default_value = DEFAULT_HOST)]
    pub host: String,
}

pub fn parse_args() -> Args {
    let args = Args::parse();
    log::info!("Args: {:?}", args);
    args
}
