pub mod pointer_proxy;
