use std::error::Error;

use tokio::net::TcpStream;
use typered::connection::Connection;
use typered::resp::Command;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let addr = std::env::var("REDIS_URL").unwrap_or_else(|_| "localhost:6379".into());
    let mut args = std::env::args().skip(1);
    let name = match args.next() {
        Some(name) => name,
        None => {
            eprintln!("usage: runcmd COMMAND [ARG]...");
            std::process::exit(2);
        }
    };
    let mut command = Command::named(&name);
    for arg in args {
        command.arg_str(&arg);
    }

    let stream = TcpStream::connect(&addr).await?;
    let (mut conn, _hello) = Connection::new(stream).await?;

    let reply = conn.command(&command).await?;
    println!("RESP: {:?}", reply);

    Ok(())
}
