mod backend_chain;
