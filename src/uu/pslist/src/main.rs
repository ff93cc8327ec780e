uucore::bin!(uu_pslist);
