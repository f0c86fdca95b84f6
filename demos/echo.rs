extern crate argparse;
extern crate env_logger;
extern crate futures;
extern crate tokio_core;
extern crate tk_frontdoor;

use std::env;
use std::process::exit;
use std::rc::Rc;
use std::time::Duration;

use argparse::{ArgumentParser, Parse, Store};
use futures::future::empty;
use tokio_core::net::TcpStream;
use tokio_core::reactor::Core;

use tk_frontdoor::Status;
use tk_frontdoor::server::{Config, Connection, Handler, HandlerError};
use tk_frontdoor::server::{Request, Response, Server};
use tk_frontdoor::websocket::Message;


const INDEX: &'static str = "\
    <!DOCTYPE html>
    <html>
    <body>
    <script>
        var ws = new WebSocket('ws://' + location.host + '/ws');
        ws.onmessage = function(ev) { console.log('echo', ev.data); };
        ws.onopen = function() { ws.send('hello'); };
    </script>
    </body>
    </html>
";

struct Echo;

#[derive(Default)]
struct Stats {
    requests: usize,
    messages: usize,
}

impl Handler<TcpStream> for Echo {
    type Data = Stats;

    fn request(&self, conn: &mut Connection<TcpStream, Stats>, req: Request)
        -> Result<Option<Response>, HandlerError>
    {
        conn.data_mut().requests += 1;
        let mut resp = Response::for_version(req.version());
        match req.path() {
            "/" => {
                resp.add_header("Content-Type", "text/html")
                    .set_body(INDEX);
            }
            "/ws" => {
                if conn.upgrade(&req) {
                    return Ok(None);
                }
                resp.status(Status::BadRequest)
                    .set_body("Websocket handshake expected");
            }
            "/echo" => {
                resp.add_header("Content-Type", "application/octet-stream")
                    .set_body(req.body());
            }
            _ => {
                resp.status(Status::NotFound);
            }
        }
        Ok(Some(resp))
    }

    fn message(&self, conn: &mut Connection<TcpStream, Stats>, msg: Message)
        -> Result<(), HandlerError>
    {
        conn.data_mut().messages += 1;
        conn.send_message(&msg.data, msg.opcode);
        Ok(())
    }
}


fn main() {
    let mut host = String::from("127.0.0.1");
    let mut port = 8080u16;
    let mut max_body_size = 2 << 20;
    let mut max_message_size = 2 << 20;
    let mut keep_alive = 300u64;
    let mut websocket_idle = 0u64;
    let mut max_connections = 1000;
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Echo server for HTTP bodies and websocket \
                            messages");
        ap.refer(&mut host)
           .add_option(&["--host"], Store,
            "Address to listen on, empty means all interfaces");
        ap.refer(&mut port)
           .add_option(&["-p", "--port"], Parse, "Port to listen on");
        ap.refer(&mut max_body_size)
           .add_option(&["--max-body-size"], Parse,
            "Maximum size of the request body in bytes");
        ap.refer(&mut max_message_size)
           .add_option(&["--max-message-size"], Parse,
            "Maximum size of the websocket message in bytes");
        ap.refer(&mut keep_alive)
           .add_option(&["--keep-alive-timeout"], Parse,
            "Idle timeout of HTTP connection in seconds (0 is unlimited)");
        ap.refer(&mut websocket_idle)
           .add_option(&["--websocket-idle-timeout"], Parse,
            "Idle timeout of websocket in seconds (0 is unlimited)");
        ap.refer(&mut max_connections)
           .add_option(&["--max-connections"], Parse,
            "Maximum number of simultaneous connections");
        ap.parse_args_or_exit();
    }

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init().expect("init logging");

    let mut lp = Core::new().expect("loop created");
    let cfg = Config::new()
        .max_body_size(max_body_size)
        .max_message_size(max_message_size)
        .keep_alive_timeout(Duration::from_secs(keep_alive))
        .websocket_idle_timeout(Duration::from_secs(websocket_idle))
        .max_connections(max_connections)
        .done();
    let server = Server::new(Rc::new(Echo), &cfg, &lp.handle());
    if let Err(e) = server.listen(&host, port) {
        eprintln!("Can't listen on {}:{}: {}", host, port, e);
        exit(1);
    }

    lp.run(empty::<(), ()>()).unwrap();
}
